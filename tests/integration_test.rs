//! Integration tests for subnet-calc
//!
//! These tests run the calculator workflows through the public API, from
//! spec text to the resulting networks.

use num_bigint::{BigInt, BigUint};
use subnet_calc::{
    cli::{run, run_lines, Cli},
    models::{unravel, weave},
    parse::{parse_same_family, SpecList},
    parse_netspec,
    processing::{derange, enumerate, minimize, resize_to_prefix, split, unused_after_split, ResizeResult},
    Ipv4Address, Ipv6Address, NetError, Network, NetworkSpec,
};

use clap::Parser;

fn v4(text: &str) -> Network<Ipv4Address> {
    text.parse().expect("valid IPv4 network")
}

fn strings<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

#[test]
fn test_slash_24_derivation() {
    let network = v4("10.0.0.0/24");
    assert_eq!(network.mask().to_string(), "255.255.255.0");
    assert_eq!(network.wildcard().to_string(), "0.0.0.255");
    assert_eq!(network.first_host(), Some("10.0.0.1".parse().unwrap()));
    assert_eq!(network.last_host(), Some("10.0.0.254".parse().unwrap()));
    assert_eq!(network.broadcast(), Some("10.0.0.255".parse().unwrap()));
    assert_eq!(network.host_count(), BigInt::from(254));
}

#[test]
fn test_derange_scenario() {
    let blocks = derange(
        "10.0.0.5".parse::<Ipv4Address>().unwrap(),
        "10.0.0.20".parse().unwrap(),
    )
    .expect("derange");
    assert_eq!(
        strings(&blocks),
        vec!["10.0.0.5/32", "10.0.0.6/31", "10.0.0.8/29", "10.0.0.16/30", "10.0.0.20/32"]
    );
}

#[test]
fn test_minimize_scenarios() {
    let subset = minimize(&[v4("10.0.0.0/16"), v4("10.0.1.0/24")]);
    assert_eq!(strings(&subset), vec!["10.0.0.0/16"]);

    let merged = minimize(&[v4("10.0.0.0/24"), v4("10.0.1.0/24")]);
    assert_eq!(strings(&merged), vec!["10.0.0.0/23"]);

    let again = minimize(&merged);
    assert_eq!(again, merged);
}

#[test]
fn test_minimize_from_parsed_specs() {
    let specs = ["192.168.0.0/24", "192.168.1.0/255.255.255.0", "192.168.2.0/-0.0.1.255"];
    let SpecList::Ipv4(specs) = parse_same_family(&specs).expect("same family") else {
        panic!("expected IPv4 specs");
    };
    let networks: Vec<_> = specs.into_iter().map(|(_, n)| n).collect();
    assert_eq!(strings(&minimize(&networks)), vec!["192.168.0.0/22"]);
}

#[test]
fn test_split_scenarios() {
    let network = v4("10.0.0.0/24");
    let demands = [100u32, 50, 20].map(BigUint::from);
    let subnets = split(&network, &demands).expect("split fits");
    assert_eq!(
        strings(&subnets),
        vec!["10.0.0.0/25", "10.0.0.128/26", "10.0.0.192/27"]
    );
    let unused = unused_after_split(&network, &subnets).expect("unused");
    assert_eq!(strings(&unused), vec!["10.0.0.224/27"]);

    let result = split(&v4("10.0.0.0/30"), &[BigUint::from(10u32)]);
    assert!(matches!(result, Err(NetError::InsufficientSpace { .. })));
}

#[test]
fn test_resize_subdivision() {
    let result = resize_to_prefix(&v4("10.0.0.0/24"), 26).expect("resize");
    let ResizeResult::Subnets(subnets) = result else {
        panic!("expected subnets");
    };
    assert_eq!(
        strings(&subnets),
        vec!["10.0.0.0/26", "10.0.0.64/26", "10.0.0.128/26", "10.0.0.192/26"]
    );
}

#[test]
fn test_scattered_mask_network() {
    let network = Network::from_mask(Ipv4Address(0xDDA6_9010), Ipv4Address(0x55E0_951D));
    assert_eq!(network.base(), Ipv4Address(0x55A0_9010));
    assert_eq!(network.cidr_prefix(), None);

    let unraveled = unravel(network.base(), network.mask());
    assert_eq!(weave(unraveled, network.mask()), network.base());

    let hosts: Vec<_> = enumerate(&network).take(2).collect();
    assert_eq!(hosts.len(), 2);
    assert!(hosts.iter().all(|h| network.contains(*h)));
}

#[test]
fn test_ipv6_spec() {
    let spec = parse_netspec("2001:db8::1234/-::ffff").expect("IPv6 spec");
    let NetworkSpec::Ipv6(address, network) = spec else {
        panic!("expected IPv6");
    };
    assert_eq!(address, "2001:db8::1234".parse::<Ipv6Address>().unwrap());
    assert_eq!(network.to_string(), "2001:db8::/112");
    assert_eq!(network.host_count(), BigInt::from(65534));
}

#[test]
fn test_cli_split_report() {
    colored::control::set_override(false);
    let cli = Cli::parse_from(["subnet-calc", "--no-color", "--split", "10.0.0.0/24", "100", "50", "20"]);
    let mut out = Vec::new();
    assert_eq!(run(&cli, &mut out), 0);
    let out = String::from_utf8(out).unwrap();

    let headings: Vec<&str> = out
        .lines()
        .filter(|l| l.starts_with("Subnet") || l.starts_with("Unused"))
        .collect();
    assert_eq!(
        headings,
        vec![
            "Subnet to split:",
            "Subnet for 100 hosts:",
            "Subnet for 50 hosts:",
            "Subnet for 20 hosts:",
            "Unused networks:",
        ]
    );
}

#[test]
fn test_cli_stdin_lines() {
    let input = "--derange 10.0.0.0 10.0.0.3\n\n--enumerate 10.0.0.0/30\n";
    let mut out = Vec::new();
    assert_eq!(run_lines(input.as_bytes(), &mut out), 0);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "10.0.0.0/30\n\n10.0.0.1\n10.0.0.2\n"
    );
}
