//! Derived session predicates.
//!
//! Neither predicate is stored. They are recomputed from the current record
//! on every call, and they intentionally answer different questions.

use super::model::{GUEST_USER_ID, GUEST_USER_TYPE, SessionRecord};

/// True iff a record exists and its `id` is non-empty.
///
/// Mobile and type are not consulted, so the guest placeholder counts as
/// logged in.
pub fn is_logged_in(record: Option<&SessionRecord>) -> bool {
    record.is_some_and(|r| !r.id.is_empty())
}

/// True iff the record is absent, has an empty mobile, carries the guest
/// id, or carries the guest type.
///
/// This is the gate in front of every contact-revealing screen.
pub fn is_guest_session(record: Option<&SessionRecord>) -> bool {
    let Some(record) = record else {
        return true;
    };

    record.mobile.as_deref().unwrap_or_default().is_empty()
        || record.id == GUEST_USER_ID
        || record.user_type.as_deref() == Some(GUEST_USER_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> SessionRecord {
        SessionRecord::new("42", "9876543210").with_type("1")
    }

    #[test]
    fn test_absent_record_is_guest() {
        assert!(is_guest_session(None));
        assert!(!is_logged_in(None));
    }

    #[test]
    fn test_member_is_not_guest() {
        let record = member();
        assert!(!is_guest_session(Some(&record)));
        assert!(is_logged_in(Some(&record)));
    }

    #[test]
    fn test_empty_mobile_alone_triggers_guest() {
        let mut record = member();
        record.mobile = Some(String::new());
        assert!(is_guest_session(Some(&record)));

        record.mobile = None;
        assert!(is_guest_session(Some(&record)));
    }

    #[test]
    fn test_guest_id_alone_triggers_guest() {
        let mut record = member();
        record.id = GUEST_USER_ID.to_string();
        assert!(is_guest_session(Some(&record)));
    }

    #[test]
    fn test_guest_type_alone_triggers_guest() {
        let record = member().with_type(GUEST_USER_TYPE);
        assert!(is_guest_session(Some(&record)));
    }

    #[test]
    fn test_is_guest_flag_is_ignored() {
        let mut record = member();
        record.is_guest = Some(true);
        assert!(!is_guest_session(Some(&record)));
    }

    #[test]
    fn test_logged_in_ignores_mobile_and_type() {
        let guest = SessionRecord::guest();
        assert!(is_logged_in(Some(&guest)));
        assert!(is_guest_session(Some(&guest)));

        let blank = SessionRecord::default();
        assert!(!is_logged_in(Some(&blank)));
    }
}
