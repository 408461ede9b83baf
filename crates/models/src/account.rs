use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer record.
///
/// `cart` holds weak references to book identifiers: insertion order is
/// preserved, duplicates are permitted, and nothing keeps a referenced
/// book alive. `balance` has no enforced lower bound; only checkout
/// refuses to proceed when funds do not cover the cart total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub balance: i64,
    pub cart: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a fresh account with an empty cart, timestamped now.
    pub fn new(id: Uuid, username: impl Into<String>, balance: i64) -> Self {
        Self {
            id,
            username: username.into(),
            balance,
            cart: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Append a book id to the cart. Duplicates are allowed.
    pub fn add_to_cart(&mut self, book_id: Uuid) {
        self.cart.push(book_id);
    }

    /// Remove every occurrence of `book_id` from the cart.
    pub fn remove_from_cart(&mut self, book_id: &Uuid) {
        self.cart.retain(|id| id != book_id);
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_has_empty_cart_and_timestamp() {
        let before = Utc::now();
        let account = Account::new(Uuid::new_v4(), "alice", 100);
        assert_eq!(account.username, "alice");
        assert_eq!(account.balance, 100);
        assert!(account.cart.is_empty());
        assert!(account.created_at >= before);
        assert!(account.created_at <= Utc::now());
    }

    #[test]
    fn cart_preserves_insertion_order_and_duplicates() {
        let mut account = Account::new(Uuid::new_v4(), "alice", 100);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        account.add_to_cart(a);
        account.add_to_cart(b);
        account.add_to_cart(a);
        assert_eq!(account.cart, vec![a, b, a]);
    }

    #[test]
    fn remove_from_cart_drops_all_occurrences() {
        let mut account = Account::new(Uuid::new_v4(), "alice", 100);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        account.add_to_cart(a);
        account.add_to_cart(b);
        account.add_to_cart(a);
        account.remove_from_cart(&a);
        assert_eq!(account.cart, vec![b]);
    }

    #[test]
    fn clear_cart_empties_without_touching_balance() {
        let mut account = Account::new(Uuid::new_v4(), "alice", 100);
        account.add_to_cart(Uuid::new_v4());
        account.clear_cart();
        assert!(account.cart.is_empty());
        assert_eq!(account.balance, 100);
    }

    #[test]
    fn serde_round_trip() {
        let mut account = Account::new(Uuid::new_v4(), "bob", -5);
        account.add_to_cart(Uuid::new_v4());
        let json = serde_json::to_string(&account).unwrap();
        let back: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(back, account);
    }
}
