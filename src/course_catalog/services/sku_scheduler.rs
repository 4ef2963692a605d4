use crate::course_catalog::domain::CourseSchedule;

/// Fallback SKU base when a template defines none
const DEFAULT_SKU_BASE: &str = "SKU";

/// Fallback display name when a template defines none
const DEFAULT_COURSE_NAME: &str = "Course";

/// Length range of a trailing date code that gets replaced on reschedule
const DATE_CODE_LENGTHS: std::ops::RangeInclusive<usize> = 8..=12;

/// Derives SKUs and display names that encode a course's start.
///
/// SKU convention: `<base>-<YYYYMMDDHHMM>`.
/// Name convention: `<title> (<YYYY-MM-DD HH:MM>)`.
pub struct SkuScheduler;

impl SkuScheduler {
    /// The SKU without its trailing date code.
    ///
    /// A trailing segment counts as a date code when it is 8 to 12 ASCII
    /// digits; otherwise the whole SKU is the base.
    pub fn base_sku(sku: &str) -> &str {
        match sku.rsplit_once('-') {
            Some((base, suffix))
                if DATE_CODE_LENGTHS.contains(&suffix.len())
                    && suffix.chars().all(|c| c.is_ascii_digit()) =>
            {
                base
            }
            _ => sku,
        }
    }

    pub fn reschedule_sku(current_sku: &str, schedule: &CourseSchedule) -> String {
        Self::course_sku(Some(Self::base_sku(current_sku)), schedule)
    }

    /// Keeps the text before the first `(` and appends the new start label.
    pub fn reschedule_name(current_name: &str, schedule: &CourseSchedule) -> String {
        let title = current_name.split('(').next().unwrap_or_default();
        Self::course_name(title, schedule)
    }

    pub fn course_sku(base_sku: Option<&str>, schedule: &CourseSchedule) -> String {
        let base = base_sku
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_SKU_BASE);
        format!("{}-{}", base, schedule.sku_code())
    }

    pub fn course_name(title: &str, schedule: &CourseSchedule) -> String {
        let title = Some(title.trim())
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_COURSE_NAME);
        format!("{} ({})", title, schedule.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feb_first() -> CourseSchedule {
        CourseSchedule::parse("2024-02-01T09:30").unwrap()
    }

    #[test]
    fn test_reschedule_replaces_date_code() {
        assert_eq!(
            SkuScheduler::reschedule_sku("COURSE-X-202401011000", &feb_first()),
            "COURSE-X-202402010930"
        );
    }

    #[test]
    fn test_reschedule_without_date_code_appends() {
        assert_eq!(
            SkuScheduler::reschedule_sku("COURSE-X", &feb_first()),
            "COURSE-X-202402010930"
        );
    }

    #[test]
    fn test_reschedule_replaces_date_only_code() {
        assert_eq!(
            SkuScheduler::reschedule_sku("BREW-20240101", &feb_first()),
            "BREW-202402010930"
        );
    }

    #[test]
    fn test_base_sku_boundaries() {
        assert_eq!(SkuScheduler::base_sku("A-1234567"), "A-1234567");
        assert_eq!(SkuScheduler::base_sku("A-12345678"), "A");
        assert_eq!(SkuScheduler::base_sku("A-123456789012"), "A");
        assert_eq!(SkuScheduler::base_sku("A-1234567890123"), "A-1234567890123");
        assert_eq!(SkuScheduler::base_sku("202401011000"), "202401011000");
        assert_eq!(SkuScheduler::base_sku("A-2024O1011000"), "A-2024O1011000");
    }

    #[test]
    fn test_reschedule_name() {
        assert_eq!(
            SkuScheduler::reschedule_name("Beer Brewing (2024-01-01 10:00)", &feb_first()),
            "Beer Brewing (2024-02-01 09:30)"
        );
    }

    #[test]
    fn test_reschedule_name_without_parenthesis() {
        assert_eq!(
            SkuScheduler::reschedule_name("Beer Brewing", &feb_first()),
            "Beer Brewing (2024-02-01 09:30)"
        );
    }

    #[test]
    fn test_reschedule_empty_fields_use_defaults() {
        assert_eq!(
            SkuScheduler::reschedule_sku("", &feb_first()),
            "SKU-202402010930"
        );
        assert_eq!(
            SkuScheduler::reschedule_name("", &feb_first()),
            "Course (2024-02-01 09:30)"
        );
    }

    #[test]
    fn test_course_sku_and_name_defaults() {
        assert_eq!(
            SkuScheduler::course_sku(None, &feb_first()),
            "SKU-202402010930"
        );
        assert_eq!(
            SkuScheduler::course_sku(Some("BREW"), &feb_first()),
            "BREW-202402010930"
        );
        assert_eq!(
            SkuScheduler::course_name("", &feb_first()),
            "Course (2024-02-01 09:30)"
        );
    }
}
