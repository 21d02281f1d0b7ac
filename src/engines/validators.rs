// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::net::IpAddr;
use tokio::net::lookup_host;
use url::Url;

use crate::engines::traits::EngineError;

/// 校验URL，拒绝解析到内网地址的目标
pub async fn validate_url(url_str: &str) -> Result<(), EngineError> {
    let url = Url::parse(url_str).map_err(|e| EngineError::Ssrf(format!("invalid url: {}", e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(EngineError::Ssrf(format!(
            "unsupported scheme: {}",
            url.scheme()
        )));
    }

    let host = url
        .host_str()
        .ok_or_else(|| EngineError::Ssrf("missing host".to_string()))?;

    if host == "localhost" {
        return Err(EngineError::Ssrf("localhost is not allowed".to_string()));
    }

    let port = url.port_or_known_default().unwrap_or(80);
    let addrs = lookup_host((host, port))
        .await
        .map_err(|e| EngineError::Ssrf(format!("failed to resolve {}: {}", host, e)))?;

    for addr in addrs {
        if is_private_ip(addr.ip()) {
            return Err(EngineError::Ssrf(format!(
                "private address is not allowed: {}",
                addr.ip()
            )));
        }
    }

    Ok(())
}

/// 判断域名是否命中黑名单（精确匹配或子域名）
pub fn host_matches_domain(host: &str, domain: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    host == domain || host.ends_with(&format!(".{}", domain))
}

fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            ipv4.is_private()
                || ipv4.is_loopback()
                || ipv4.is_link_local()
                || ipv4.is_multicast()
                || ipv4.is_unspecified()
                || ipv4.is_broadcast()
        }
        IpAddr::V6(ipv6) => {
            let first = ipv6.segments()[0];
            ipv6.is_loopback()
                || ipv6.is_unspecified()
                // fc00::/7
                || (first & 0xfe00) == 0xfc00
                // fe80::/10
                || (first & 0xffc0) == 0xfe80
                || ipv6.is_multicast()
        }
    }
}
