//! Netlink payload fixtures for parser tests.
//!
//! Each function returns the payload of one message (everything after the
//! nlmsghdr), as the kernel sends it, so parsing can be tested without a
//! live socket.

/// Link payload for the loopback interface (UP|LOOPBACK|RUNNING).
pub fn link_loopback() -> Vec<u8> {
    vec![
        // ifinfomsg: family=0, type=772 (ARPHRD_LOOPBACK), index=1, flags=0x49
        0x00, 0x00, // family, pad
        0x04, 0x03, // type = 772
        0x01, 0x00, 0x00, 0x00, // index = 1
        0x49, 0x00, 0x00, 0x00, // flags = IFF_UP | IFF_LOOPBACK | IFF_RUNNING
        0x00, 0x00, 0x00, 0x00, // change = 0
        // IFLA_IFNAME = "lo"
        0x07, 0x00, 0x03, 0x00, //
        b'l', b'o', 0x00, 0x00, // "lo\0" + padding
        // IFLA_MTU = 65536
        0x08, 0x00, 0x04, 0x00, //
        0x00, 0x00, 0x01, 0x00, //
        // IFLA_OPERSTATE = 0 (UNKNOWN)
        0x05, 0x00, 0x10, 0x00, //
        0x00, 0x00, 0x00, 0x00, // operstate + padding
    ]
}

/// Link payload for `eth0`: admin up with carrier (UP|BROADCAST|RUNNING|MULTICAST|LOWER_UP).
pub fn link_eth_running() -> Vec<u8> {
    vec![
        // ifinfomsg: family=0, type=1 (ARPHRD_ETHER), index=2, flags=0x11043
        0x00, 0x00, // family, pad
        0x01, 0x00, // type = 1
        0x02, 0x00, 0x00, 0x00, // index = 2
        0x43, 0x10, 0x01, 0x00, // flags
        0x00, 0x00, 0x00, 0x00, // change = 0
        // IFLA_IFNAME = "eth0"
        0x09, 0x00, 0x03, 0x00, //
        b'e', b't', b'h', b'0', 0x00, 0x00, 0x00, 0x00, // "eth0\0" + padding
        // IFLA_MTU = 1500
        0x08, 0x00, 0x04, 0x00, //
        0xdc, 0x05, 0x00, 0x00, //
        // IFLA_OPERSTATE = 6 (UP)
        0x05, 0x00, 0x10, 0x00, //
        0x06, 0x00, 0x00, 0x00, //
        // IFLA_CARRIER = 1
        0x05, 0x00, 0x21, 0x00, //
        0x01, 0x00, 0x00, 0x00, //
    ]
}

/// Link payload for `eth1`: admin up, cable unplugged (UP|BROADCAST|MULTICAST).
pub fn link_eth_no_carrier() -> Vec<u8> {
    vec![
        // ifinfomsg: family=0, type=1 (ARPHRD_ETHER), index=2, flags=0x1003
        0x00, 0x00, // family, pad
        0x01, 0x00, // type = 1
        0x02, 0x00, 0x00, 0x00, // index = 2
        0x03, 0x10, 0x00, 0x00, // flags
        0x00, 0x00, 0x00, 0x00, // change = 0
        // IFLA_IFNAME = "eth1"
        0x09, 0x00, 0x03, 0x00, //
        b'e', b't', b'h', b'1', 0x00, 0x00, 0x00, 0x00, // "eth1\0" + padding
        // IFLA_OPERSTATE = 3 (LOWERLAYERDOWN)
        0x05, 0x00, 0x10, 0x00, //
        0x03, 0x00, 0x00, 0x00, //
        // IFLA_CARRIER = 0
        0x05, 0x00, 0x21, 0x00, //
        0x00, 0x00, 0x00, 0x00, //
    ]
}

/// Address payload for 10.0.0.5/24 on `eth0`.
pub fn addr_eth_v4() -> Vec<u8> {
    vec![
        // ifaddrmsg: family=AF_INET, prefixlen=24, flags=0, scope=RT_SCOPE_UNIVERSE, index=2
        0x02, 0x18, 0x00, 0x00, //
        0x02, 0x00, 0x00, 0x00, // index = 2
        // IFA_ADDRESS = 10.0.0.5
        0x08, 0x00, 0x01, 0x00, //
        0x0a, 0x00, 0x00, 0x05, //
        // IFA_LOCAL = 10.0.0.5
        0x08, 0x00, 0x02, 0x00, //
        0x0a, 0x00, 0x00, 0x05, //
        // IFA_LABEL = "eth0"
        0x09, 0x00, 0x03, 0x00, //
        b'e', b't', b'h', b'0', 0x00, 0x00, 0x00, 0x00, // "eth0\0" + padding
    ]
}

/// Address payload for fe80::1/64 on `eth0`.
pub fn addr_eth_v6_link_local() -> Vec<u8> {
    vec![
        // ifaddrmsg: family=AF_INET6, prefixlen=64, flags=IFA_F_PERMANENT, scope=RT_SCOPE_LINK, index=2
        0x0a, 0x40, 0x80, 0xfd, //
        0x02, 0x00, 0x00, 0x00, // index = 2
        // IFA_ADDRESS = fe80::1
        0x14, 0x00, 0x01, 0x00, //
        0xfe, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, //
    ]
}

/// Address payload for a point-to-point tunnel: local 10.8.0.2, peer 10.8.0.1, /32.
pub fn addr_ptp_v4() -> Vec<u8> {
    vec![
        // ifaddrmsg: family=AF_INET, prefixlen=32, flags=0x80, scope=RT_SCOPE_UNIVERSE, index=5
        0x02, 0x20, 0x80, 0x00, //
        0x05, 0x00, 0x00, 0x00, // index = 5
        // IFA_ADDRESS = 10.8.0.1 (peer)
        0x08, 0x00, 0x01, 0x00, //
        0x0a, 0x08, 0x00, 0x01, //
        // IFA_LOCAL = 10.8.0.2
        0x08, 0x00, 0x02, 0x00, //
        0x0a, 0x08, 0x00, 0x02, //
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_aligned() {
        let all = [
            link_loopback(),
            link_eth_running(),
            link_eth_no_carrier(),
            addr_eth_v4(),
            addr_eth_v6_link_local(),
            addr_ptp_v4(),
        ];
        for fixture in all {
            assert_eq!(fixture.len() % 4, 0);
        }
    }
}
