//! Entity records for the bookmart marketplace.
//! - `Book`: catalog item, immutable after creation.
//! - `Account`: customer record owning a balance and a cart of book ids.

pub mod account;
pub mod book;

pub use account::Account;
pub use book::Book;
