pub mod mock_probes;

#[allow(unused_imports)]
pub use mock_probes::*;
