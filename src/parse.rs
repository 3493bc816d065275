//! Textual network specs.
//!
//! Recognizes `addr/prefix`, `addr/mask` and `addr/-wildcard` for both
//! address families, plus the bare addresses, subnets and host counts the
//! command-line modes take.

use crate::error::{NetError, Result};
use crate::models::{IpAddress, Ipv4Address, Ipv6Address, Network};
use lazy_static::lazy_static;
use num_bigint::BigUint;
use regex::Regex;

lazy_static! {
    static ref IPV4_WITH_CIDR: Regex =
        Regex::new(r"^(?P<addr>[0-9]+(?:[.][0-9]+){3})/(?P<cidr>[0-9]+)$").expect("Invalid Regex?");
    static ref IPV4_WITH_SUBNET: Regex = Regex::new(
        r"^(?P<addr>[0-9]+(?:[.][0-9]+){3})/(?P<wildcard>-)?(?P<mask>[0-9]+(?:[.][0-9]+){3})$"
    )
    .expect("Invalid Regex?");
    static ref IPV6_WITH_CIDR: Regex =
        Regex::new(r"^(?P<addr>[0-9A-Fa-f:]+)/(?P<cidr>[0-9]+)$").expect("Invalid Regex?");
    static ref IPV6_WITH_SUBNET: Regex =
        Regex::new(r"^(?P<addr>[0-9A-Fa-f:]+)/(?P<wildcard>-)?(?P<mask>[0-9A-Fa-f:]+)$")
            .expect("Invalid Regex?");
}

/// A parsed `address/subnet` spec of either family.
///
/// Keeps the address as written next to the network it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkSpec {
    Ipv4(Ipv4Address, Network<Ipv4Address>),
    Ipv6(Ipv6Address, Network<Ipv6Address>),
}

/// Several specs, all of one family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpecList {
    Ipv4(Vec<(Ipv4Address, Network<Ipv4Address>)>),
    Ipv6(Vec<(Ipv6Address, Network<Ipv6Address>)>),
}

/// Two bare addresses of one family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressPair {
    Ipv4(Ipv4Address, Ipv4Address),
    Ipv6(Ipv6Address, Ipv6Address),
}

/// The `addr/prefix` and `addr/subnet` recognizers of one family.
fn spec_patterns<A: IpAddress>() -> (&'static Regex, &'static Regex) {
    if A::BYTES == 4 {
        (&*IPV4_WITH_CIDR, &*IPV4_WITH_SUBNET)
    } else {
        (&*IPV6_WITH_CIDR, &*IPV6_WITH_SUBNET)
    }
}

/// Parse a CIDR prefix; digits only, at most the family's width.
pub fn parse_prefix<A: IpAddress>(text: &str) -> Result<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NetError::parse("CIDR prefix", text));
    }
    let prefix: u32 = text
        .parse()
        .map_err(|_| NetError::parse("CIDR prefix", text))?;
    let max = A::bit_width();
    if prefix > max {
        return Err(NetError::PrefixOutOfRange { prefix, max });
    }
    Ok(prefix)
}

/// Parse a mask written as an address, or as its inverse when `wildcard` is set.
fn parse_mask<A: IpAddress>(text: &str, wildcard: bool) -> Result<A> {
    if wildcard {
        let wildcard: A = text.parse().map_err(|_| NetError::parse("wildcard", text))?;
        return Ok(!wildcard);
    }
    text.parse().map_err(|_| NetError::parse("subnet mask", text))
}

/// Parse the part after the `/`: a prefix, a mask, or `-` and a wildcard.
///
/// # Returns
/// The subnet mask.
pub fn parse_subnet<A: IpAddress>(text: &str) -> Result<A> {
    if let Some(wildcard) = text.strip_prefix('-') {
        return parse_mask(wildcard, true);
    }
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return A::mask_from_cidr(parse_prefix::<A>(text)?);
    }
    parse_mask(text, false)
}

/// Parse `addr/prefix`, `addr/mask` or `addr/-wildcard` of a known family.
///
/// # Returns
/// The address as written and the network it lies in.
///
/// # Errors
/// [`NetError::Unrecognized`] when the text is no spec of this family.
pub fn parse_network<A: IpAddress>(text: &str) -> Result<(A, Network<A>)> {
    let (with_cidr, with_subnet) = spec_patterns::<A>();

    // keep the prefix form so out-of-range prefixes report as such
    if let Some(caps) = with_cidr.captures(text) {
        let address: A = caps["addr"].parse()?;
        let prefix = parse_prefix::<A>(&caps["cidr"])?;
        return Ok((address, Network::from_cidr(address, prefix)?));
    }
    if let Some(caps) = with_subnet.captures(text) {
        let address: A = caps["addr"].parse()?;
        let mask = parse_mask::<A>(&caps["mask"], caps.name("wildcard").is_some())?;
        return Ok((address, Network::from_mask(address, mask)));
    }
    Err(NetError::Unrecognized(text.to_string()))
}

/// Detect the family of a spec and parse it.
///
/// # Errors
/// [`NetError::Unrecognized`] when the text matches none of the spec forms.
pub fn parse_netspec(text: &str) -> Result<NetworkSpec> {
    match parse_network::<Ipv4Address>(text) {
        Ok((address, network)) => return Ok(NetworkSpec::Ipv4(address, network)),
        Err(NetError::Unrecognized(_)) => {}
        Err(e) => return Err(e),
    }
    match parse_network::<Ipv6Address>(text) {
        Ok((address, network)) => Ok(NetworkSpec::Ipv6(address, network)),
        Err(e @ NetError::Unrecognized(_)) => {
            log::debug!("no spec form matches {text:?}");
            Err(e)
        }
        Err(e) => Err(e),
    }
}

/// Parse a list of specs that must all belong to one family.
///
/// The family is taken from the first spec; an empty list is an empty IPv4 list.
pub fn parse_same_family<S: AsRef<str>>(texts: &[S]) -> Result<SpecList> {
    let mut list = SpecList::Ipv4(Vec::new());
    for (i, text) in texts.iter().enumerate() {
        let spec = parse_netspec(text.as_ref())?;
        if i == 0 && matches!(spec, NetworkSpec::Ipv6(..)) {
            list = SpecList::Ipv6(Vec::new());
        }
        match (&mut list, spec) {
            (SpecList::Ipv4(specs), NetworkSpec::Ipv4(a, n)) => specs.push((a, n)),
            (SpecList::Ipv6(specs), NetworkSpec::Ipv6(a, n)) => specs.push((a, n)),
            _ => return Err(NetError::MixedFamilies),
        }
    }
    Ok(list)
}

/// Parse two bare addresses of the same family.
pub fn parse_address_pair(one: &str, two: &str) -> Result<AddressPair> {
    if let Ok(first) = one.parse::<Ipv4Address>() {
        return match two.parse::<Ipv4Address>() {
            Ok(second) => Ok(AddressPair::Ipv4(first, second)),
            Err(_) if two.parse::<Ipv6Address>().is_ok() => Err(NetError::MixedFamilies),
            Err(e) => Err(e),
        };
    }
    if let Ok(first) = one.parse::<Ipv6Address>() {
        return match two.parse::<Ipv6Address>() {
            Ok(second) => Ok(AddressPair::Ipv6(first, second)),
            Err(_) if two.parse::<Ipv4Address>().is_ok() => Err(NetError::MixedFamilies),
            Err(e) => Err(e),
        };
    }
    Err(NetError::parse("address", one))
}

/// Parse a non-negative decimal host count of any size.
pub fn parse_host_count(text: &str) -> Result<BigUint> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NetError::parse("host count", text));
    }
    text.parse()
        .map_err(|_| NetError::parse("host count", text))
}
