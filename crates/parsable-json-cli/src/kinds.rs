use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use parsable_json::ConverterRegistry;

use crate::guid::Guid;

/// Registry of every value kind the CLI accepts, keyed by kind name.
pub fn builtin_registry() -> parsable_json::Result<ConverterRegistry> {
    let mut registry = ConverterRegistry::new();
    registry
        .register_named::<i32>("i32")?
        .register_named::<i64>("i64")?
        .register_named::<u64>("u64")?
        .register_named::<f64>("f64")?
        .register_named::<bool>("bool")?
        .register_named::<char>("char")?
        .register_named::<IpAddr>("ip")?
        .register_named::<Ipv4Addr>("ipv4")?
        .register_named::<Ipv6Addr>("ipv6")?
        .register_named::<SocketAddr>("socket")?
        .register_named::<Guid>("guid")?;
    Ok(registry)
}
