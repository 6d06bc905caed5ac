// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Green Points award policy.

use crate::models::{CleanupType, DustbinStatus};

/// Reporting a dustbin as filled.
pub const DUSTBIN_FILLED_POINTS: i64 = 10;
/// Any waste report without a verified cleanup.
pub const REPORT_POINTS: i64 = 30;
/// Self-cleaned report with an after photo.
pub const REPORT_SELF_CLEANED_POINTS: i64 = 50;
/// Organizing (adopting) a cleanup drive.
pub const DRIVE_ADOPTED_POINTS: i64 = 50;
/// Total for a drive finished with an after photo.
pub const DRIVE_COMPLETED_POINTS: i64 = 100;

/// Points for a waste report.
pub fn award_for_report(cleanup_type: CleanupType, has_after_image: bool) -> i64 {
    match (cleanup_type, has_after_image) {
        (CleanupType::SelfClean, true) => REPORT_SELF_CLEANED_POINTS,
        (CleanupType::SelfClean, false) => REPORT_POINTS,
        (CleanupType::SubmitToAuthority, _) => REPORT_POINTS,
    }
}

/// Total points a drive is worth.
pub fn award_for_drive(has_after_image: bool) -> i64 {
    if has_after_image {
        DRIVE_COMPLETED_POINTS
    } else {
        DRIVE_ADOPTED_POINTS
    }
}

/// Points still owed when a drive is completed, given what it has already
/// paid out. Tops the drive up to the full completion award.
pub fn completion_bonus(already_awarded: i64) -> i64 {
    (award_for_drive(true) - already_awarded).max(0)
}

/// Points for a dustbin status change.
pub fn award_for_dustbin(new_status: DustbinStatus) -> i64 {
    match new_status {
        DustbinStatus::Filled => DUSTBIN_FILLED_POINTS,
        DustbinStatus::Empty => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_award_table() {
        assert_eq!(award_for_report(CleanupType::SelfClean, true), 50);
        assert_eq!(award_for_report(CleanupType::SelfClean, false), 30);
        assert_eq!(award_for_report(CleanupType::SubmitToAuthority, true), 30);
        assert_eq!(award_for_report(CleanupType::SubmitToAuthority, false), 30);
    }

    #[test]
    fn test_drive_award_table() {
        assert_eq!(award_for_drive(true), 100);
        assert_eq!(award_for_drive(false), 50);
        assert_eq!(
            award_for_drive(false) + completion_bonus(award_for_drive(false)),
            award_for_drive(true)
        );
        assert_eq!(completion_bonus(0), award_for_drive(true));
        assert_eq!(completion_bonus(award_for_drive(true)), 0);
    }

    #[test]
    fn test_dustbin_award() {
        assert_eq!(award_for_dustbin(DustbinStatus::Filled), 10);
        assert_eq!(award_for_dustbin(DustbinStatus::Empty), 0);
    }
}
