/// Optional view attached to a session.
///
/// Commands ask it to scroll to a displayed position after appending an entry
/// that passes the current filter. Sessions without a display behave the same.
pub trait TransactionDisplay {
    fn scroll_to(&mut self, displayed_position: usize);
}
