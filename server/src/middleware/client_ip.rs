use std::{
    fmt,
    net::{IpAddr, SocketAddr},
    str::FromStr,
};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, Response, header::FORWARDED},
    middleware::Next,
};
use forwarded_header_value::{ForwardedHeaderValue, Identifier};

/// Remote address for the access log: the remotest `for=` of a `Forwarded`
/// header, otherwise the peer of the connection. Displays as `-` when
/// neither is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientIp(pub Option<IpAddr>);

impl ClientIp {
    pub fn resolve<B>(request: &Request<B>) -> Self {
        let forwarded = request
            .headers()
            .get(FORWARDED)
            .and_then(|val| val.to_str().ok())
            .and_then(|val| ForwardedHeaderValue::from_str(val).ok())
            .and_then(|forwarded| forwarded.into_remotest().forwarded_for)
            .and_then(|identifier| match identifier {
                Identifier::SocketAddr(socket_addr) => Some(socket_addr.ip()),
                Identifier::IpAddr(ip_addr) => Some(ip_addr),
                _ => None,
            });

        let peer = || {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip())
        };

        Self(forwarded.or_else(peer))
    }
}

impl fmt::Display for ClientIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ip) => write!(f, "{ip}"),
            None => f.write_str("-"),
        }
    }
}

pub async fn mw_client_ip(mut request: Request<Body>, next: Next) -> Response<Body> {
    let ip = ClientIp::resolve(&request);
    request.extensions_mut().insert(ip);
    next.run(request).await
}
