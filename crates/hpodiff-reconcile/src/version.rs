//! Release ordering and version tags.

use crate::error::{ReconcileError, Result};
use chrono::NaiveDate;
use hpodiff_ontology::Ontology;

pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Release date of a data version such as `hp/releases/2024-01-16`.
///
/// Everything up to and including the last `/` is dropped before parsing.
pub fn release_date(data_version: &str) -> Result<NaiveDate> {
    let date = data_version
        .rsplit_once('/')
        .map_or(data_version, |(_, tail)| tail);
    NaiveDate::parse_from_str(date.trim(), RELEASE_DATE_FORMAT).map_err(|source| {
        ReconcileError::MalformedVersion {
            version: data_version.to_string(),
            source,
        }
    })
}

/// File-name friendly tag: `hp/releases/2024-01-16` → `hp_2024-01-16`.
pub fn version_tag(data_version: &str) -> String {
    data_version.replace("releases/", "").replace('/', "_")
}

/// `hpodiff_<older>_to_<younger>.xlsx`
pub fn report_file_name(older: &Ontology, younger: &Ontology) -> String {
    format!(
        "hpodiff_{}_to_{}.xlsx",
        version_tag(older.data_version()),
        version_tag(younger.data_version())
    )
}

/// Two snapshots in release order.
#[derive(Debug, Clone, Copy)]
pub struct ReleasePair<'a> {
    pub older: &'a Ontology,
    pub younger: &'a Ontology,
    /// The second input turned out to be the older release.
    pub swapped: bool,
}

impl<'a> ReleasePair<'a> {
    /// Order two snapshots by release date. On equal dates the first input is
    /// treated as the older one.
    pub fn order(first: &'a Ontology, second: &'a Ontology) -> Result<Self> {
        let first_date = release_date(first.data_version())?;
        let second_date = release_date(second.data_version())?;
        let swapped = second_date < first_date;
        tracing::debug!(%first_date, %second_date, swapped, "ordered releases");

        Ok(if swapped {
            Self {
                older: second,
                younger: first,
                swapped,
            }
        } else {
            Self {
                older: first,
                younger: second,
                swapped,
            }
        })
    }

    pub fn report_file_name(&self) -> String {
        report_file_name(self.older, self.younger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn onto(version: &str) -> Ontology {
        Ontology::builder(version).build()
    }

    #[test]
    fn parses_date_after_last_slash() {
        let date = release_date("hp/releases/2024-01-16").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
        assert!(release_date("2023-12-01").is_ok());
    }

    #[test]
    fn rejects_non_dates() {
        for bad in ["", "hp/releases/latest", "hp/releases/2024-13-01", "2024/01/16"] {
            let err = release_date(bad).unwrap_err();
            assert!(
                matches!(err, ReconcileError::MalformedVersion { ref version, .. } if version == bad),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn orders_by_date_regardless_of_input_order() {
        let old = onto("hp/releases/2023-10-09");
        let new = onto("hp/releases/2024-01-16");

        let pair = ReleasePair::order(&new, &old).unwrap();
        assert!(pair.swapped);
        assert_eq!(pair.older.data_version(), "hp/releases/2023-10-09");
        assert_eq!(pair.younger.data_version(), "hp/releases/2024-01-16");

        let pair = ReleasePair::order(&old, &new).unwrap();
        assert!(!pair.swapped);
        assert_eq!(pair.older.data_version(), "hp/releases/2023-10-09");
    }

    #[test]
    fn equal_dates_keep_input_order() {
        let a = onto("hp/releases/2024-01-16");
        let b = onto("hp/releases/2024-01-16");
        let pair = ReleasePair::order(&a, &b).unwrap();
        assert!(!pair.swapped);
        assert!(std::ptr::eq(pair.older, &a));
    }

    #[test]
    fn report_name_uses_version_tags() {
        let old = onto("hp/releases/2023-10-09");
        let new = onto("hp/releases/2024-01-16");
        let pair = ReleasePair::order(&old, &new).unwrap();
        assert_eq!(
            pair.report_file_name(),
            "hpodiff_hp_2023-10-09_to_hp_2024-01-16.xlsx"
        );
        assert_eq!(version_tag("2024-01-16"), "2024-01-16");
    }
}
