mod probing;

pub use probing::ProbeServices;
