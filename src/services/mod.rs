pub mod checkout;

pub use checkout::{CartLine, CheckoutOutcome, CheckoutService};
