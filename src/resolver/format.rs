use derive_more::Display;

pub const SCHEMES: &[&str] = &["http://", "https://", "socks5://", "socks4://"];

#[derive(Debug, Display, PartialEq)]
pub enum ProxyFormatError {
    #[display(fmt = "unrecognized proxy format: {}", _0)]
    Unrecognized(String),
    #[display(fmt = "expected exactly one '{}' in {} segment {:?}", separator, part, value)]
    Malformed {
        part: &'static str,
        separator: char,
        value: String,
    },
}

/// Normalizes a configured proxy into a URL the HTTP client accepts.
///
/// Strings that already carry a scheme pass through. Legacy `host:port` and
/// `user:password@host:port` become `socks5://` URLs. Anything else is logged
/// and resolves to `None`, meaning "connect directly".
pub fn format_proxy(proxy: Option<&str>) -> Option<String> {
    let proxy = proxy.filter(|s| !s.is_empty())?;

    match parse_proxy(proxy) {
        Ok(url) => Some(url),
        Err(e @ ProxyFormatError::Unrecognized(_)) => {
            log::error!("{}", e);
            None
        }
        Err(e) => {
            log::error!("failed to format proxy {:?}: {}", proxy, e);
            None
        }
    }
}

pub fn parse_proxy(proxy: &str) -> Result<String, ProxyFormatError> {
    if SCHEMES.iter().any(|scheme| proxy.starts_with(scheme)) {
        return Ok(proxy.to_owned());
    }

    if proxy.contains('@') {
        let (credentials, host_port) = split_pair(proxy, '@', "proxy")?;
        let (user, password) = split_pair(credentials, ':', "credentials")?;
        let (host, port) = split_pair(host_port, ':', "host")?;

        return Ok(format!("socks5://{}:{}@{}:{}", user, password, host, port));
    }

    match split_pair(proxy, ':', "host") {
        Ok((host, port)) => Ok(format!("socks5://{}:{}", host, port)),
        Err(_) => Err(ProxyFormatError::Unrecognized(proxy.to_owned())),
    }
}

fn split_pair<'a>(
    value: &'a str,
    separator: char,
    part: &'static str,
) -> Result<(&'a str, &'a str), ProxyFormatError> {
    let mut parts = value.splitn(3, separator);

    match (parts.next(), parts.next(), parts.next()) {
        (Some(left), Some(right), None) => Ok((left, right)),
        _ => Err(ProxyFormatError::Malformed {
            part,
            separator,
            value: value.to_owned(),
        }),
    }
}
