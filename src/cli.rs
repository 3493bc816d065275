//! Command-line interface for subnet-calc
//!
//! Uses clap with derive for the mode flags; every mode writes its results
//! to the given writer and returns the process exit code.

use crate::error::NetError;
use crate::models::{IpAddress, Network};
use crate::output::{render, show_network, NetworkSummary};
use crate::parse::{
    parse_address_pair, parse_host_count, parse_netspec, parse_same_family, parse_subnet,
    AddressPair, NetworkSpec, SpecList,
};
use crate::processing::{
    derange, enumerate, minimize, resize, split, unused_after_split, ResizeResult,
};
use clap::Parser;
use num_bigint::BigUint;
use serde::Serialize;
use std::error::Error;
use std::io::{BufRead, Write};

const SPLIT_DOES_NOT_FIT: &str = "Not enough addresses available for this split.";

/// subnet-calc - IPv4/IPv6 subnet calculator
///
/// SUBNET is one of: SUBNETMASK, CIDRPREFIX or -WILDCARD.
/// IPv4 and IPv6 are supported, but cannot be mixed within an invocation.
#[derive(Parser, Debug)]
#[command(name = "subnet-calc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Combine networks into the smallest covering set: SPEC...
    #[arg(short, long, group = "mode")]
    pub minimize: bool,

    /// Cover an address range with CIDR blocks: ADDRESS ADDRESS
    #[arg(short, long, group = "mode")]
    pub derange: bool,

    /// Split a network by host counts: ADDRESS/CIDRPREFIX HOSTCOUNT...
    #[arg(short, long, group = "mode")]
    pub split: bool,

    /// Resize a network to another mask: SPEC SUBNET
    #[arg(short, long, group = "mode")]
    pub resize: bool,

    /// List the host addresses of networks: SPEC...
    #[arg(short, long, group = "mode")]
    pub enumerate: bool,

    /// Read one invocation per line from standard input
    #[arg(long, group = "mode")]
    pub stdin: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Network specs (ADDRESS/SUBNET) and mode arguments
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

type CliResult = Result<(), Box<dyn Error>>;

fn usage_error(message: &str) -> Box<dyn Error> {
    format!("{message} (see --help)").into()
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> CliResult {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn write_networks<W: Write, A: IpAddress>(out: &mut W, networks: &[Network<A>], json: bool) -> CliResult {
    if json {
        return write_json(out, networks);
    }
    for network in networks {
        writeln!(out, "{network}")?;
    }
    Ok(())
}

/// Show every spec; a spec that fails to parse is reported and skipped.
fn perform_show<W: Write>(cli: &Cli, out: &mut W) -> CliResult {
    if cli.args.is_empty() {
        return Err(usage_error("no network given"));
    }

    let mut summaries = Vec::new();
    let mut failed = 0;
    for text in &cli.args {
        let spec = match parse_netspec(text) {
            Ok(spec) => spec,
            Err(e) => {
                eprintln!("{text}: {e}");
                failed += 1;
                continue;
            }
        };
        match spec {
            NetworkSpec::Ipv4(address, network) if cli.json => {
                summaries.push(serde_json::to_value(NetworkSummary::new(Some(address), &network))?)
            }
            NetworkSpec::Ipv6(address, network) if cli.json => {
                summaries.push(serde_json::to_value(NetworkSummary::new(Some(address), &network))?)
            }
            NetworkSpec::Ipv4(address, network) => {
                write!(out, "{}", render(&show_network(Some(address), &network)))?
            }
            NetworkSpec::Ipv6(address, network) => {
                write!(out, "{}", render(&show_network(Some(address), &network)))?
            }
        }
    }

    if cli.json {
        write_json(out, &summaries)?;
    }
    if failed > 0 {
        return Err(format!("{failed} network spec(s) could not be parsed").into());
    }
    Ok(())
}

fn perform_minimize<W: Write>(cli: &Cli, out: &mut W) -> CliResult {
    if cli.args.is_empty() {
        return Err(usage_error("--minimize needs at least one network"));
    }
    match parse_same_family(cli.args.as_slice())? {
        SpecList::Ipv4(specs) => {
            let networks: Vec<_> = specs.into_iter().map(|(_, n)| n).collect();
            write_networks(out, &minimize(&networks), cli.json)
        }
        SpecList::Ipv6(specs) => {
            let networks: Vec<_> = specs.into_iter().map(|(_, n)| n).collect();
            write_networks(out, &minimize(&networks), cli.json)
        }
    }
}

fn perform_derange<W: Write>(cli: &Cli, out: &mut W) -> CliResult {
    let [one, two] = cli.args.as_slice() else {
        return Err(usage_error("--derange needs exactly two addresses"));
    };
    match parse_address_pair(one, two)? {
        AddressPair::Ipv4(a, b) => write_networks(out, &derange(a, b)?, cli.json),
        AddressPair::Ipv6(a, b) => write_networks(out, &derange(a, b)?, cli.json),
    }
}

#[derive(Serialize)]
struct SplitEntry<A: IpAddress> {
    hosts: String,
    network: Network<A>,
}

#[derive(Serialize)]
struct SplitReport<A: IpAddress> {
    network: Network<A>,
    fits: bool,
    subnets: Vec<SplitEntry<A>>,
    unused: Vec<Network<A>>,
}

fn split_and_output<W: Write, A: IpAddress>(
    network: &Network<A>,
    demands: &[BigUint],
    json: bool,
    out: &mut W,
) -> CliResult {
    let subnets = match split(network, demands) {
        Ok(subnets) => subnets,
        Err(NetError::InsufficientSpace { .. }) => {
            if json {
                let report = SplitReport {
                    network: *network,
                    fits: false,
                    subnets: Vec::new(),
                    unused: Vec::new(),
                };
                return write_json(out, &report);
            }
            writeln!(out, "Subnet to split:")?;
            write!(out, "{}", render(&show_network(Some(network.base()), network)))?;
            writeln!(out)?;
            writeln!(out, "{SPLIT_DOES_NOT_FIT}")?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let unused = unused_after_split(network, &subnets)?;

    if json {
        let report = SplitReport {
            network: *network,
            fits: true,
            subnets: demands
                .iter()
                .zip(&subnets)
                .map(|(hosts, subnet)| SplitEntry {
                    hosts: hosts.to_string(),
                    network: *subnet,
                })
                .collect(),
            unused,
        };
        return write_json(out, &report);
    }

    writeln!(out, "Subnet to split:")?;
    write!(out, "{}", render(&show_network(Some(network.base()), network)))?;
    writeln!(out)?;
    for (hosts, subnet) in demands.iter().zip(&subnets) {
        writeln!(out, "Subnet for {hosts} hosts:")?;
        write!(out, "{}", render(&show_network(Some(subnet.base()), subnet)))?;
        writeln!(out)?;
    }
    writeln!(out, "Unused networks:")?;
    for network in &unused {
        writeln!(out, "{network}")?;
    }
    Ok(())
}

fn perform_split<W: Write>(cli: &Cli, out: &mut W) -> CliResult {
    let [spec, counts @ ..] = cli.args.as_slice() else {
        return Err(usage_error("--split needs a network and host counts"));
    };
    if counts.is_empty() {
        return Err(usage_error("--split needs at least one host count"));
    }
    let demands = counts
        .iter()
        .map(|c| parse_host_count(c))
        .collect::<Result<Vec<_>, _>>()?;

    match parse_netspec(spec)? {
        NetworkSpec::Ipv4(_, network) => split_and_output(&network, &demands, cli.json, out),
        NetworkSpec::Ipv6(_, network) => split_and_output(&network, &demands, cli.json, out),
    }
}

#[derive(Serialize)]
struct ResizeReport<A: IpAddress> {
    network: Network<A>,
    /// -1 supernet, 0 same size, 1 subdivision.
    comparison: i8,
    networks: Vec<Network<A>>,
}

fn resize_and_output<W: Write, A: IpAddress>(
    network: &Network<A>,
    subnet: &str,
    json: bool,
    out: &mut W,
) -> CliResult {
    let new_mask = parse_subnet::<A>(subnet)?;
    let result = resize(network, new_mask)?;

    if json {
        let report = ResizeReport {
            network: *network,
            comparison: result.comparison() as i8,
            networks: result.networks(),
        };
        return write_json(out, &report);
    }

    let heading = match result {
        ResizeResult::Supernet(_) => "Supernet:",
        ResizeResult::Same(_) => "Resized network:",
        ResizeResult::Subnets(_) => "Subnets:",
    };
    writeln!(out, "{heading}")?;
    write_networks(out, &result.networks(), false)
}

fn perform_resize<W: Write>(cli: &Cli, out: &mut W) -> CliResult {
    let [spec, subnet] = cli.args.as_slice() else {
        return Err(usage_error("--resize needs a network and a new subnet"));
    };
    match parse_netspec(spec)? {
        NetworkSpec::Ipv4(_, network) => resize_and_output(&network, subnet, cli.json, out),
        NetworkSpec::Ipv6(_, network) => resize_and_output(&network, subnet, cli.json, out),
    }
}

fn enumerate_and_output<W: Write, A: IpAddress>(
    networks: &[Network<A>],
    json: bool,
    out: &mut W,
) -> CliResult {
    if json {
        let hosts: Vec<A> = networks.iter().flat_map(enumerate).collect();
        return write_json(out, &hosts);
    }
    for host in networks.iter().flat_map(enumerate) {
        writeln!(out, "{host}")?;
    }
    Ok(())
}

fn perform_enumerate<W: Write>(cli: &Cli, out: &mut W) -> CliResult {
    if cli.args.is_empty() {
        return Err(usage_error("--enumerate needs at least one network"));
    }
    match parse_same_family(cli.args.as_slice())? {
        SpecList::Ipv4(specs) => {
            let networks: Vec<_> = specs.into_iter().map(|(_, n)| n).collect();
            enumerate_and_output(&networks, cli.json, out)
        }
        SpecList::Ipv6(specs) => {
            let networks: Vec<_> = specs.into_iter().map(|(_, n)| n).collect();
            enumerate_and_output(&networks, cli.json, out)
        }
    }
}

/// Run one invocation and return its exit code: 0 on success, 1 on error.
///
/// Errors are reported on stderr; results go to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> i32 {
    if cli.no_color || cli.json {
        colored::control::set_override(false);
    }
    log::debug!("run({:?})", cli);

    let result = if cli.minimize {
        perform_minimize(cli, out)
    } else if cli.derange {
        perform_derange(cli, out)
    } else if cli.split {
        perform_split(cli, out)
    } else if cli.resize {
        perform_resize(cli, out)
    } else if cli.enumerate {
        perform_enumerate(cli, out)
    } else {
        perform_show(cli, out)
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            log::warn!("invocation failed: {e}");
            eprintln!("{e}");
            1
        }
    }
}

/// Run every line of `input` as a separate invocation.
///
/// Empty lines are echoed as empty lines. Returns the highest exit code of
/// all lines.
pub fn run_lines<R: BufRead, W: Write>(input: R, out: &mut W) -> i32 {
    let mut exit_code = 0;
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Failed to read input: {e}");
                return exit_code.max(1);
            }
        };

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            if writeln!(out).is_err() {
                return exit_code.max(1);
            }
            continue;
        }

        let line_code = match Cli::try_parse_from(std::iter::once("subnet-calc").chain(words)) {
            Ok(cli) if cli.stdin => {
                eprintln!("--stdin cannot be used inside --stdin input");
                1
            }
            Ok(cli) => run(&cli, out),
            Err(e) => {
                eprintln!("{e}");
                1
            }
        };
        exit_code = exit_code.max(line_code);
    }
    exit_code
}
