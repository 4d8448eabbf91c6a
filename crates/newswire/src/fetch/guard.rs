//! Target Guard
//!
//! Validates fetch targets before any network access: only `http`/`https`
//! schemes, and never hosts inside loopback, private, or link-local
//! ranges. Keeps a user-supplied feed URL from steering the gateway at
//! internal infrastructure.

use std::net::{Ipv4Addr, Ipv6Addr};

use url::{Host, Url};

use crate::error::{NewswireError, Result};

/// Validate a raw target, returning the parsed URL if it is safe to fetch.
pub fn check_target(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|_| NewswireError::UnsafeTarget(raw.into()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(NewswireError::UnsafeTarget(raw.into()));
    }

    match url.host() {
        Some(Host::Domain(domain)) => {
            if is_blocked_domain(domain) {
                return Err(NewswireError::UnsafeTarget(raw.into()));
            }
        }
        Some(Host::Ipv4(ip)) => {
            if is_blocked_v4(ip) {
                return Err(NewswireError::UnsafeTarget(raw.into()));
            }
        }
        Some(Host::Ipv6(ip)) => {
            if is_blocked_v6(ip) {
                return Err(NewswireError::UnsafeTarget(raw.into()));
            }
        }
        None => return Err(NewswireError::UnsafeTarget(raw.into())),
    }

    Ok(url)
}

fn is_blocked_domain(domain: &str) -> bool {
    let domain = domain.trim_end_matches('.');
    domain.eq_ignore_ascii_case("localhost") || domain.to_ascii_lowercase().ends_with(".localhost")
}

fn is_blocked_v4(ip: Ipv4Addr) -> bool {
    ip.is_loopback() || ip.is_private() || ip.is_link_local() || ip.is_unspecified()
}

fn is_blocked_v6(ip: Ipv6Addr) -> bool {
    ip.is_loopback() || ip.is_unspecified()
}
