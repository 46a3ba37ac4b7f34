use ipnet::IpNet;
use once_cell::sync::Lazy;
use std::net::IpAddr;

#[allow(clippy::unwrap_used)] // These are hardcoded and should not fail
static LOCAL_RANGES: Lazy<Vec<IpNet>> = Lazy::new(|| {
    vec![
        // IPV4 Loopback (RFC 1122)
        "127.0.0.0/8".parse().unwrap(),
        // IPV4 Private Networks (RFC 1918)
        "10.0.0.0/8".parse().unwrap(),
        "172.16.0.0/12".parse().unwrap(),
        "192.168.0.0/16".parse().unwrap(),
        // IPV4 Link Local (RFC 3927)
        "169.254.0.0/16".parse().unwrap(),
        // IPV6 Loopback (RFC 4291)
        "::1/128".parse().unwrap(),
        // IPV6 Unique Local (RFC 4193)
        "fc00::/7".parse().unwrap(),
        // IPV6 Link Local (RFC 4291)
        "fe80::/10".parse().unwrap(),
    ]
});

/// Whether `addr` is a loopback, private or link-local address.
///
/// IPv4-mapped IPv6 addresses are classified by their IPv4 form.
pub fn is_local_addr(addr: &IpAddr) -> bool {
    let addr = addr.to_canonical();
    LOCAL_RANGES.iter().any(|range| range.contains(&addr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[rstest]
    #[case("127.0.0.1", true)]
    #[case("127.255.255.254", true)]
    #[case("10.0.0.1", true)]
    #[case("10.255.255.255", true)]
    #[case("172.16.0.1", true)]
    #[case("172.31.255.255", true)]
    #[case("172.32.0.1", false)]
    #[case("172.15.255.255", false)]
    #[case("192.168.1.1", true)]
    #[case("192.169.0.1", false)]
    #[case("169.254.10.20", true)]
    #[case("2.56.20.0", false)]
    #[case("8.8.8.8", false)]
    #[case("0.0.0.0", false)]
    #[case("::1", true)]
    #[case("fd12:3456:789a::1", true)]
    #[case("fc00::1", true)]
    #[case("fe80::1", true)]
    #[case("febf::1", true)]
    #[case("fec0::1", false)]
    #[case("2001:4860:4860::8888", false)]
    #[case("::", false)]
    #[case("::ffff:192.168.1.1", true)]
    #[case("::ffff:8.8.8.8", false)]
    fn test_is_local_addr(#[case] addr: &str, #[case] expected: bool) {
        let addr: IpAddr = addr.parse().unwrap();
        assert_eq!(is_local_addr(&addr), expected);
    }

    #[test]
    fn test_local_ranges_cover_both_families() {
        assert!(LOCAL_RANGES.iter().any(|r| matches!(r, IpNet::V4(_))));
        assert!(LOCAL_RANGES.iter().any(|r| matches!(r, IpNet::V6(_))));
    }

    proptest! {
        #[test]
        fn test_ten_slash_eight_is_local(b in any::<u8>(), c in any::<u8>(), d in any::<u8>()) {
            let addr = IpAddr::V4(Ipv4Addr::new(10, b, c, d));
            prop_assert!(is_local_addr(&addr));
        }

        #[test]
        fn test_classification_matches_std_for_ipv4(raw in any::<u32>()) {
            let v4 = Ipv4Addr::from(raw);
            let expected = v4.is_private() || v4.is_loopback() || v4.is_link_local();
            prop_assert_eq!(is_local_addr(&IpAddr::V4(v4)), expected);
        }

        #[test]
        fn test_mapped_ipv4_matches_plain_ipv4(raw in any::<u32>()) {
            let v4 = Ipv4Addr::from(raw);
            let mapped = IpAddr::V6(v4.to_ipv6_mapped());
            prop_assert_eq!(is_local_addr(&mapped), is_local_addr(&IpAddr::V4(v4)));
        }

        #[test]
        fn test_global_unicast_ipv6_is_not_local(segments in prop::array::uniform8(any::<u16>())) {
            let mut segments = segments;
            // 2000::/3
            segments[0] = 0x2000 | (segments[0] & 0x1fff);
            let addr = IpAddr::V6(Ipv6Addr::from(segments));
            prop_assert!(!is_local_addr(&addr));
        }
    }
}
