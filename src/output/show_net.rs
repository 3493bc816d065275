//! The "show network" report.
//!
//! Builds the report as lines of styled tokens; turning styles into terminal
//! colors is left to [`super::terminal`].

use super::terminal::pad_field;
use crate::models::{IpAddress, Network};
use num_traits::Signed;
use serde::Serialize;

const LABEL_WIDTH: usize = 11;
const IPV4_ADDRESS_WIDTH: usize = 21;
const IPV6_ADDRESS_WIDTH: usize = 46;

/// What a piece of report text represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    Label,
    Address,
    HostBits,
    NetBits,
    MaskBits,
    ClassBits,
    Separator,
}

/// One piece of report text with its style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub style: Style,
}

impl Token {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Token {
            text: text.into(),
            style,
        }
    }
}

pub type Line = Vec<Token>;

/// Append text to a line, extending the last token when the style matches.
fn push(line: &mut Line, text: &str, style: Style) {
    match line.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => line.push(Token::new(text, style)),
    }
}

/// Bits per binary group and the separator between groups.
fn binary_layout<A: IpAddress>() -> (usize, &'static str) {
    if A::BYTES == 4 {
        (8, ".")
    } else {
        (16, ":")
    }
}

fn address_width<A: IpAddress>() -> usize {
    if A::BYTES == 4 {
        IPV4_ADDRESS_WIDTH
    } else {
        IPV6_ADDRESS_WIDTH
    }
}

fn bit_at(bytes: &[u8], index: usize) -> bool {
    bytes[index / 8] & (0x80 >> (index % 8)) != 0
}

/// How the bits of a binary rendering are colored.
#[derive(Clone, Copy)]
enum BitColors<A> {
    /// Everything in one style.
    Plain(Style),
    /// Net bits and host bits by mask, optionally flagging the IPv4 class bits.
    ByMask { mask: A, class: bool },
}

/// Number of leading class bits of an IPv4 first octet (`0`, `10`, `110`, `1110`/`1111`),
/// if the mask covers all of them.
fn class_bit_count(first: u8, mask_first: u8) -> Option<usize> {
    let count = (first.leading_ones() as usize).min(3) + 1;
    (mask_first.leading_ones() as usize >= count).then_some(count)
}

/// Render an address in binary, grouped like the address itself.
fn push_binary<A: IpAddress>(line: &mut Line, addr: A, colors: BitColors<A>) {
    let (group_bits, separator) = binary_layout::<A>();
    let octets = addr.octets();
    let bytes = octets.as_ref();
    let width = A::bit_width() as usize;

    let (mask_octets, class_bits) = match colors {
        BitColors::ByMask { mask, class } => {
            let mask_octets = mask.octets();
            let class_bits = if class && A::BYTES == 4 {
                class_bit_count(bytes[0], mask_octets.as_ref()[0]).unwrap_or(0)
            } else {
                0
            };
            (Some(mask_octets), class_bits)
        }
        BitColors::Plain(_) => (None, 0),
    };

    for i in 0..width {
        if i > 0 && i % group_bits == 0 {
            push(line, separator, Style::Separator);
        }
        let style = match (&colors, &mask_octets) {
            (BitColors::Plain(style), _) => *style,
            _ if i < class_bits => Style::ClassBits,
            (_, Some(mask)) if bit_at(mask.as_ref(), i) => Style::NetBits,
            _ => Style::HostBits,
        };
        push(line, if bit_at(bytes, i) { "1" } else { "0" }, style);
    }
}

/// Label and value columns that start most report lines.
fn initial_columns<A: IpAddress>(label: &str, value: &str) -> Line {
    let mut line = Line::new();
    push(&mut line, &pad_field(label, LABEL_WIDTH), Style::Label);
    push(&mut line, &pad_field(value, address_width::<A>()), Style::Address);
    line
}

/// The classful network name for an IPv4 base address and mask.
pub fn classful_name(first: u8, mask_first: u8) -> Option<&'static str> {
    let top = |n: u32| first >> (8 - n);
    let mask_covers = |n: u32| mask_first.leading_ones() >= n;
    if top(1) == 0b0 && mask_covers(1) {
        Some("Class A")
    } else if top(2) == 0b10 && mask_covers(2) {
        Some("Class B")
    } else if top(3) == 0b110 && mask_covers(3) {
        Some("Class C")
    } else if top(4) == 0b1110 && mask_covers(4) {
        Some("Class D (multicast)")
    } else if top(4) == 0b1111 && mask_covers(4) {
        Some("Class E (reserved)")
    } else {
        None
    }
}

/// Build the report for `network`.
///
/// With an `address`, the report starts with the address, netmask and
/// wildcard lines followed by `=>`.
pub fn show_network<A: IpAddress>(address: Option<A>, network: &Network<A>) -> Vec<Line> {
    let mut lines = Vec::new();
    let mask = network.mask();

    if let Some(address) = address {
        let mut line = initial_columns::<A>("Address:", &address.to_string());
        push_binary(&mut line, address, BitColors::ByMask { mask, class: false });
        lines.push(line);

        let netmask = match network.cidr_prefix() {
            Some(prefix) => format!("{mask} = {prefix}"),
            None => mask.to_string(),
        };
        let mut line = initial_columns::<A>("Netmask:", &netmask);
        push_binary(&mut line, mask, BitColors::Plain(Style::MaskBits));
        lines.push(line);

        let mut line = initial_columns::<A>("Wildcard:", &network.wildcard().to_string());
        push_binary(&mut line, network.wildcard(), BitColors::Plain(Style::HostBits));
        lines.push(line);

        lines.push(vec![Token::new("=>", Style::Label)]);
    }

    let mut line = initial_columns::<A>("Network:", &network.to_string());
    push_binary(&mut line, network.base(), BitColors::ByMask { mask, class: true });
    lines.push(line);

    match (network.first_host(), network.last_host()) {
        (Some(first), Some(last)) => {
            for (label, host) in [("HostMin:", first), ("HostMax:", last)] {
                let mut line = initial_columns::<A>(label, &host.to_string());
                push_binary(&mut line, host, BitColors::Plain(Style::HostBits));
                lines.push(line);
            }
        }
        _ => lines.push(vec![Token::new("no hosts", Style::Label)]),
    }

    match network.broadcast() {
        Some(broadcast) => {
            let mut line = initial_columns::<A>("Broadcast:", &broadcast.to_string());
            push_binary(&mut line, broadcast, BitColors::Plain(Style::HostBits));
            lines.push(line);
        }
        None => lines.push(vec![Token::new("no broadcast", Style::Label)]),
    }

    let host_count = network.host_count();
    if host_count.is_positive() {
        let mut line = initial_columns::<A>("Hosts/Net:", &host_count.to_string());
        if A::BYTES == 4 {
            let (base, mask) = (network.base().octets(), mask.octets());
            if let Some(name) = classful_name(base.as_ref()[0], mask.as_ref()[0]) {
                push(&mut line, name, Style::ClassBits);
            }
        }
        lines.push(line);
    } else {
        lines.push(vec![Token::new("no hosts/net", Style::Label)]);
    }

    lines
}

/// Plain-data view of a network for JSON output.
#[derive(Debug, Serialize)]
pub struct NetworkSummary<A: IpAddress> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<A>,
    pub network: Network<A>,
    pub netmask: A,
    pub cidr_prefix: Option<u32>,
    pub wildcard: A,
    pub host_min: Option<A>,
    pub host_max: Option<A>,
    pub broadcast: Option<A>,
    /// Decimal string; IPv6 host counts exceed every JSON number type.
    pub host_count: String,
}

impl<A: IpAddress> NetworkSummary<A> {
    pub fn new(address: Option<A>, network: &Network<A>) -> Self {
        NetworkSummary {
            address,
            network: *network,
            netmask: network.mask(),
            cidr_prefix: network.cidr_prefix(),
            wildcard: network.wildcard(),
            host_min: network.first_host(),
            host_max: network.last_host(),
            broadcast: network.broadcast(),
            host_count: network.host_count().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ipv4Address, Ipv6Address};

    fn text_of(line: &Line) -> String {
        line.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_show_slash_24_with_address() {
        let network: Network<Ipv4Address> = "192.168.1.0/24".parse().unwrap();
        let lines = show_network(Some(Ipv4Address::new(192, 168, 1, 77)), &network);
        let texts: Vec<String> = lines.iter().map(text_of).collect();

        assert_eq!(texts.len(), 9);
        assert_eq!(
            texts[0],
            format!(
                "{:<11}{:<21}{}",
                "Address:", "192.168.1.77", "11000000.10101000.00000001.01001101"
            )
        );
        assert_eq!(
            texts[1],
            format!(
                "{:<11}{:<21}{}",
                "Netmask:", "255.255.255.0 = 24", "11111111.11111111.11111111.00000000"
            )
        );
        assert_eq!(texts[3], "=>");
        assert!(texts[4].starts_with("Network:   192.168.1.0/24       "));
        assert!(texts[5].starts_with("HostMin:   192.168.1.1 "));
        assert!(texts[6].starts_with("HostMax:   192.168.1.254 "));
        assert!(texts[7].starts_with("Broadcast: 192.168.1.255 "));
        assert_eq!(texts[8], format!("{:<11}{:<21}Class C", "Hosts/Net:", "254"));
    }

    #[test]
    fn test_network_line_styles() {
        let network: Network<Ipv4Address> = "192.168.1.0/24".parse().unwrap();
        let lines = show_network(None, &network);
        let network_line = &lines[0];

        assert_eq!(network_line[0], Token::new("Network:   ", Style::Label));
        // 110 class bits, then the rest of the first octet is network
        assert_eq!(network_line[2], Token::new("110", Style::ClassBits));
        assert_eq!(network_line[3], Token::new("00000", Style::NetBits));
        assert_eq!(network_line[4], Token::new(".", Style::Separator));
        let last = &network_line[network_line.len() - 1];
        assert_eq!(*last, Token::new("00000000", Style::HostBits));
    }

    #[test]
    fn test_show_host_route() {
        let network: Network<Ipv4Address> = "10.1.2.3/32".parse().unwrap();
        let texts: Vec<String> = show_network(None, &network).iter().map(text_of).collect();
        assert_eq!(texts[1], "no hosts");
        assert_eq!(texts[2], "no broadcast");
        assert_eq!(texts[3], "no hosts/net");
    }

    #[test]
    fn test_show_scattered() {
        let network: Network<Ipv4Address> = "18.52.86.120/255.0.0.255".parse().unwrap();
        let texts: Vec<String> = show_network(None, &network).iter().map(text_of).collect();
        assert!(texts[0].starts_with("Network:   18.0.0.120/255.0.0.255 "));
        assert!(texts[1].starts_with("HostMin:   18.0.1.120 "));
        assert!(texts[3].starts_with("Broadcast: 18.255.255.120 "));
        assert_eq!(texts[4], format!("{:<11}{:<21}Class A", "Hosts/Net:", "65534"));
    }

    #[test]
    fn test_show_ipv6() {
        let network: Network<Ipv6Address> = "2001:db8::/126".parse().unwrap();
        let lines = show_network(None, &network);
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert!(texts[0].starts_with("Network:   2001:db8::/126"));
        // eight 16-bit groups separated by colons
        let binary = &texts[0][LABEL_WIDTH + IPV6_ADDRESS_WIDTH..];
        assert_eq!(binary.len(), 128 + 7);
        assert_eq!(binary.matches(':').count(), 7);
        assert!(texts[3].starts_with("Broadcast: 2001:db8::3 "));
        assert!(texts[3].ends_with(":0000000000000000:0000000000000011"));
        assert_eq!(texts[4].trim_end(), "Hosts/Net: 2");
    }

    #[test]
    fn test_classful_name() {
        assert_eq!(classful_name(10, 255), Some("Class A"));
        assert_eq!(classful_name(172, 255), Some("Class B"));
        assert_eq!(classful_name(192, 255), Some("Class C"));
        assert_eq!(classful_name(224, 240), Some("Class D (multicast)"));
        assert_eq!(classful_name(240, 255), Some("Class E (reserved)"));
        assert_eq!(classful_name(192, 0x80), None);
        assert_eq!(classful_name(10, 0), None);
    }

    #[test]
    fn test_summary_json() {
        let network: Network<Ipv4Address> = "10.0.0.0/30".parse().unwrap();
        let summary = NetworkSummary::new(None, &network);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["network"], "10.0.0.0/30");
        assert_eq!(json["netmask"], "255.255.255.252");
        assert_eq!(json["cidr_prefix"], 30);
        assert_eq!(json["host_min"], "10.0.0.1");
        assert_eq!(json["broadcast"], "10.0.0.3");
        assert_eq!(json["host_count"], "2");
        assert!(json.get("address").is_none());
    }
}
