//! Types that represent the core data model, such as `RawSponsor` and `ClassifiedSponsor`.
mod amount;
mod classified;
mod dates;
mod profile;
mod sponsor;
mod summary;
mod transaction;

pub use amount::{parse_amount, Amount, AmountError};
pub use classified::{Category, ClassifiedSponsor};
pub use dates::{days_since, parse_timestamp, since_when};
pub use profile::Profile;
pub use sponsor::RawSponsor;
pub use summary::{Summary, SummaryDocument, TopSponsor, UiSponsor};
pub use transaction::{is_recurring_tier_name, RawTransaction, Transaction, TransactionStatus};
