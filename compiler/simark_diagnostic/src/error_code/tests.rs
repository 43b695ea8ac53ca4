use super::*;

#[test]
fn test_fault_kinds_map_to_fault_codes() {
    let kinds = [
        FaultKind::UnboundName,
        FaultKind::MalformedBinding,
        FaultKind::ArgumentMerge,
        FaultKind::MalformedSyntax,
        FaultKind::ReadAheadUnavailable,
        FaultKind::RecursionLimit,
    ];
    for kind in kinds {
        let code = ErrorCode::from(kind);
        assert!(code.is_fault(), "{kind} mapped to {code}");
        assert!(!code.is_warning());
    }
}

#[test]
fn test_categories_are_disjoint() {
    assert!(ErrorCode::S0002.is_warning());
    assert!(!ErrorCode::S0002.is_fault());
    assert!(ErrorCode::S9001.is_internal_error());
    assert!(!ErrorCode::S9001.is_fault());
}

#[test]
fn test_display_matches_as_str() {
    assert_eq!(ErrorCode::S1003.to_string(), "S1003");
    assert_eq!(ErrorCode::S1003.as_str(), "S1003");
}
