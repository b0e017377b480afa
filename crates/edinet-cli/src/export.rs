//! CSV export for search and ranking results.

use edinet_core::{CompanySummary, RankingEntry};
use serde::Serialize;

#[derive(Serialize)]
struct RankingRow<'a> {
    rank: usize,
    name: &'a str,
    edinet_code: &'a str,
    value: Option<f64>,
}

fn write_rows<T: Serialize>(path: &str, rows: impl Iterator<Item = T>) -> anyhow::Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

pub fn companies_csv(path: &str, companies: &[CompanySummary]) -> anyhow::Result<usize> {
    write_rows(path, companies.iter())
}

pub fn ranking_csv(path: &str, entries: &[RankingEntry]) -> anyhow::Result<usize> {
    write_rows(
        path,
        entries.iter().enumerate().map(|(i, entry)| RankingRow {
            rank: i + 1,
            name: &entry.name,
            edinet_code: &entry.edinet_code,
            value: entry.value,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_csv_writes_header_and_rows() {
        let entries = vec![
            RankingEntry {
                name: "Nintendo Co., Ltd.".to_string(),
                edinet_code: "E02367".to_string(),
                value: Some(25.1),
                extra: Default::default(),
            },
            RankingEntry {
                name: "Sample KK".to_string(),
                edinet_code: "E01825".to_string(),
                value: None,
                extra: Default::default(),
            },
        ];

        let dir = std::env::temp_dir().join("edinet-cli-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ranking.csv");
        let path = path.to_str().unwrap();

        let rows = ranking_csv(path, &entries).unwrap();
        assert_eq!(rows, 2);

        let contents = std::fs::read_to_string(path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("rank,name,edinet_code,value"));
        assert_eq!(lines.next(), Some("1,\"Nintendo Co., Ltd.\",E02367,25.1"));
        assert_eq!(lines.next(), Some("2,Sample KK,E01825,"));
    }
}
