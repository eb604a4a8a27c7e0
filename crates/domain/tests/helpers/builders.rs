#![allow(dead_code)]
use hostpulse_domain::{Capability, Endpoint};

pub fn endpoint(name: &str, address: &str) -> Endpoint {
    Endpoint::new(name, address)
}

pub fn roster(entries: &[(&str, &str)]) -> Vec<Endpoint> {
    entries
        .iter()
        .map(|(name, address)| endpoint(name, address))
        .collect()
}

pub fn reachability_only(name: &str, address: &str) -> Endpoint {
    Endpoint::new(name, address).with_capabilities(vec![Capability::Reachability])
}
