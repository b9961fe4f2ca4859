//! IP address rules.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

crate::rule! {
    /// IPv4 or IPv6 address.
    pub Ip = "ip", "Invalid IP address";
    rule(ctx) { ctx.text().is_some_and(|s| s.parse::<IpAddr>().is_ok()) }
}

crate::rule! {
    /// Dotted-quad IPv4 address.
    pub Ipv4 = "ipv4", "Invalid IPv4 address";
    rule(ctx) { ctx.text().is_some_and(|s| s.parse::<Ipv4Addr>().is_ok()) }
}

crate::rule! {
    /// IPv6 address, compressed forms included.
    pub Ipv6 = "ipv6", "Invalid IPv6 address";
    rule(ctx) { ctx.text().is_some_and(|s| s.parse::<Ipv6Addr>().is_ok()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{check_value, passes};
    use crate::value::Value;
    use rstest::rstest;

    #[rstest]
    #[case("192.168.0.1", true, true, false)]
    #[case("255.255.255.255", true, true, false)]
    #[case("256.1.1.1", false, false, false)]
    #[case("1.2.3", false, false, false)]
    // zero-padded octets
    #[case("192.168.001.001", false, false, false)]
    #[case("010.0.0.1", false, false, false)]
    #[case("::1", true, false, true)]
    #[case("2001:db8::ff00:42:8329", true, false, true)]
    #[case("fe80:0:0:0:0:0:0:1", true, false, true)]
    #[case("2001:db8::g", false, false, false)]
    #[case("", false, false, false)]
    fn ip_family(
        #[case] input: &str,
        #[case] any: bool,
        #[case] v4: bool,
        #[case] v6: bool,
    ) {
        assert_eq!(passes(&Ip, input, &[]), any);
        assert_eq!(passes(&Ipv4, input, &[]), v4);
        assert_eq!(passes(&Ipv6, input, &[]), v6);
    }

    #[test]
    fn non_strings_fail() {
        assert!(!check_value(&Ip, Some(Value::from(127)), &[]).unwrap());
        assert!(!check_value(&Ipv4, None, &[]).unwrap());
    }
}
