mod client_ip;
mod cors;
mod json_body;
mod normalize;
mod panic;
mod render_5xx;
mod security_headers;

pub use client_ip::{ClientIp, mw_client_ip};
pub use cors::cors;
pub use json_body::mw_json_body;
pub use normalize::lowercase_path;
pub use panic::handle_panic;
pub use render_5xx::mw_render_5xx;
pub use security_headers::mw_security_headers;
