use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::warn;

use super::record::{parse_record, SdeRecord};
use crate::error::Error;
use crate::ui::{RunStat, Ui};

/// How often (in lines) progress is pushed to the UI
const PROGRESS_INTERVAL: u64 = 1000;

/// Parse every line of `T::SOURCE_FILE` inside `input_dir`.
///
/// Blank lines are skipped. Lines that are not UTF-8 JSON objects are logged
/// and skipped. A missing file or a failed read is fatal.
pub fn parse_jsonl<T: SdeRecord>(input_dir: &Path, ui: &mut impl Ui) -> Result<Vec<T>> {
    let file_path = input_dir.join(T::SOURCE_FILE);

    if !file_path.exists() {
        return Err(Error::MissingInput {
            file: T::SOURCE_FILE,
            path: file_path,
        }
        .into());
    }

    let total_lines = count_lines(&file_path)?;
    let file = File::open(&file_path)
        .with_context(|| format!("Failed to open: {:?}", file_path))?;
    let reader = BufReader::new(file);

    ui.log(format!("Parsing {}...", T::SOURCE_FILE));

    let mut records = Vec::new();
    let mut processed: u64 = 0;
    let mut skipped: u64 = 0;

    for (idx, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes.with_context(|| format!("Failed to read from {}", T::SOURCE_FILE))?;
        processed += 1;

        if processed % PROGRESS_INTERVAL == 0 {
            ui.set_progress(processed, total_lines, T::LABEL);
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        match decode_line::<T>(&bytes) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => {
                skipped += 1;
                warn!(
                    file = T::SOURCE_FILE,
                    line = idx + 1,
                    "Skipping unparsable line: {:#}",
                    e
                );
            }
        }
    }

    ui.set_progress(processed, total_lines, T::LABEL);
    ui.report(RunStat::Parsed {
        file: T::SOURCE_FILE,
        records: records.len(),
        skipped,
    });

    Ok(records)
}

fn decode_line<T: SdeRecord>(bytes: &[u8]) -> Result<Option<T>> {
    let line = std::str::from_utf8(bytes).context("Line is not valid UTF-8")?;
    parse_record(line)
}

fn count_lines(path: &Path) -> Result<u64> {
    let file = File::open(path).with_context(|| format!("Failed to open: {:?}", path))?;
    let mut count = 0;
    for line in BufReader::new(file).split(b'\n') {
        line.with_context(|| format!("Failed to read: {:?}", path))?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Region, Stargate};
    use crate::ui::{Phase, SilentUi};
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn test_skips_blank_and_malformed_lines() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "mapRegions.jsonl",
            concat!(
                "{\"_key\":10000001,\"name\":{\"en\":\"Derelik\"}}\n",
                "\n",
                "   \n",
                "{\"_key\":10000002,\"name\":{\"en\":\"The Forge\"}\n",
                "this is not json\n",
                "{\"_key\":10000003,\"name\":{\"en\":\"Vale of the Silent\"}}\n",
            ),
        );

        let regions: Vec<Region> = parse_jsonl(dir.path(), &mut SilentUi::new()).unwrap();
        let ids: Vec<i64> = regions.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![10000001, 10000003]);
        assert_eq!(regions[1].name.as_deref(), Some("Vale of the Silent"));
    }

    #[test]
    fn test_invalid_stargates_are_filtered() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "mapStargates.jsonl",
            concat!(
                "{\"_key\":1,\"solarSystemID\":10,\"destination\":{\"solarSystemID\":20,\"stargateID\":2}}\n",
                "{\"_key\":2,\"solarSystemID\":20}\n",
                "{\"_key\":3,\"solarSystemID\":20,\"destination\":{\"solarSystemID\":10}}\n",
            ),
        );

        let gates: Vec<Stargate> = parse_jsonl(dir.path(), &mut SilentUi::new()).unwrap();
        assert_eq!(gates.iter().map(|g| g.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = parse_jsonl::<Region>(dir.path(), &mut SilentUi::new()).unwrap_err();

        match err.downcast_ref::<Error>() {
            Some(Error::MissingInput { file, path }) => {
                assert_eq!(*file, "mapRegions.jsonl");
                assert_eq!(path, &dir.path().join("mapRegions.jsonl"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    /// Keeps the per-file figures a run reports
    #[derive(Default)]
    struct RecordingUi {
        stats: Vec<RunStat>,
    }

    impl Ui for RecordingUi {
        fn set_phase(&mut self, _phase: Phase) {}
        fn set_info(&mut self, _info: impl Into<String>) {}
        fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
        fn clear_progress(&mut self) {}
        fn log(&mut self, _message: impl Into<String>) {}
        fn report(&mut self, stat: RunStat) {
            self.stats.push(stat);
        }
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let dir = TempDir::new().unwrap();
        let mut contents = b"{\"_key\":1}\n{\"_key\":2,\"name\":{\"en\":\"".to_vec();
        contents.extend_from_slice(b"\xff\xfe");
        contents.extend_from_slice(b"\"}}\n{\"_key\":3}\n");
        fs::write(dir.path().join("mapRegions.jsonl"), contents).unwrap();

        let mut ui = RecordingUi::default();
        let regions: Vec<Region> = parse_jsonl(dir.path(), &mut ui).unwrap();

        assert_eq!(regions.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(
            ui.stats,
            vec![RunStat::Parsed {
                file: "mapRegions.jsonl",
                records: 2,
                skipped: 1,
            }]
        );
    }

    #[test]
    fn test_reports_skipped_json_lines() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "mapConstellations.jsonl",
            "{\"_key\":20000001}\r\n[1,2]\r\n{broken\r\n",
        );

        let mut ui = RecordingUi::default();
        let constellations: Vec<crate::model::Constellation> =
            parse_jsonl(dir.path(), &mut ui).unwrap();

        assert_eq!(constellations.len(), 1);
        assert_eq!(
            ui.stats,
            vec![RunStat::Parsed {
                file: "mapConstellations.jsonl",
                records: 1,
                skipped: 2,
            }]
        );
    }
}
