//!
//! Generate DSA domain components, keypairs and per-message secrets
//!

mod components;
mod keypair;
mod secret_number;

pub(crate) use self::components::{common as common_components, public as public_component};
pub(crate) use self::keypair::keypair;
pub(crate) use self::secret_number::{secret_number, secret_number_rfc6979};
