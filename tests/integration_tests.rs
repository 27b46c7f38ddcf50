use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use frame_remap::adapters::FsTextSource;
use frame_remap::mapping::TableSink;
use frame_remap::ports::TextSourcePort;
use frame_remap::*;

/// Test utilities for mapping files
mod test_utils {
    use super::*;

    /// Write `content` to a mapping file inside `dir`
    pub fn write_mapping_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).expect("write mapping file");
        path
    }

    pub fn remap(frames: usize, args: &FilterArgs) -> Result<RemapFrames<ClipInfo>, DomainError> {
        RemapFrames::new(ClipInfo::with_frames(frames), None, args, &FsTextSource)
    }

    pub fn indices<F: FrameMapper>(filter: &F) -> Vec<usize> {
        (0..filter.num_frames())
            .map(|n| filter.request(n).expect("frame in range").index)
            .collect()
    }
}

use test_utils::*;

/// Port whose files fail halfway through reading
struct BrokenSource;

struct BrokenReader {
    served: bool,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served {
            return Err(io::Error::new(io::ErrorKind::Other, "device went away"));
        }
        self.served = true;
        let line = b"0 1\n";
        buf[..line.len()].copy_from_slice(line);
        Ok(line.len())
    }
}

impl TextSourcePort for BrokenSource {
    fn open(&self, _path: &Path) -> io::Result<Box<dyn BufRead>> {
        Ok(Box::new(BufReader::new(BrokenReader { served: false })))
    }
}

#[test]
fn test_identity_default() {
    let filter = remap(25, &FilterArgs::default()).unwrap();
    assert_eq!(indices(&filter), (0..25).collect::<Vec<_>>());
}

#[test]
fn test_inline_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_mapping_file(&dir, "map.txt", "[0 9] 1\n5 0\n");

    let args = FilterArgs {
        filename: Some(path),
        mappings: Some("[3 5] 7".to_string()),
        mismatch: false,
    };
    let filter = remap(10, &args).unwrap();
    assert_eq!(indices(&filter), vec![1, 1, 1, 7, 7, 7, 1, 1, 1, 1]);
}

#[test]
fn test_range_to_range_interpolation() {
    let forward = remap(10, &FilterArgs::with_mappings("[0 9] [0 9]")).unwrap();
    assert_eq!(indices(&forward), (0..10).collect::<Vec<_>>());

    let reverse = remap(10, &FilterArgs::with_mappings("[0 9] [9 0]")).unwrap();
    assert_eq!(indices(&reverse), (0..10).map(|i| 9 - i).collect::<Vec<_>>());
}

#[test]
fn test_bounds_rejection_in_every_grammar() {
    assert!(remap(10, &FilterArgs::with_mappings("9 9")).is_ok());
    let err = remap(10, &FilterArgs::with_mappings("0 10")).unwrap_err();
    assert_eq!(err.diagnostic().unwrap().cause, Cause::IndexOutOfBounds);

    let clip = ClipInfo::with_frames(10);
    assert!(RemapFramesSimple::new(clip.clone(), &FilterArgs::with_mappings("9"), &FsTextSource).is_ok());
    let err = RemapFramesSimple::new(clip.clone(), &FilterArgs::with_mappings("10"), &FsTextSource)
        .unwrap_err();
    assert_eq!(err.diagnostic().unwrap().cause, Cause::IndexOutOfBounds);

    let err = ReplaceFramesSimple::new(
        clip.clone(),
        clip,
        &FilterArgs::with_mappings("[0 10]"),
        &FsTextSource,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "ReplaceFramesSimple: Index out of bounds in mappings at line 1, column 4"
    );
}

#[test]
fn test_sequence_append_order() {
    let filter = RemapFramesSimple::new(
        ClipInfo::with_frames(3),
        &FilterArgs::with_mappings("0 0 1 2 2"),
        &FsTextSource,
    )
    .unwrap();
    assert_eq!(filter.num_frames(), 5);
    assert_eq!(indices(&filter), vec![0, 0, 1, 2, 2]);
}

#[test]
fn test_sequence_from_file_keeps_clip_properties() {
    let dir = TempDir::new().unwrap();
    let path = write_mapping_file(&dir, "frames.txt", "# intro\n0 1 2\n\n10 11 # tail\n");
    let clip = ClipInfo::parse("1280x720:YUV420P10:30000/1001:12").unwrap();

    let filter = RemapFramesSimple::new(clip.clone(), &FilterArgs::with_file(path), &FsTextSource)
        .unwrap();
    assert_eq!(indices(&filter), vec![0, 1, 2, 10, 11]);
    assert_eq!(filter.output_info().dimensions, clip.dimensions);
    assert_eq!(filter.output_info().num_frames, 5);
}

#[test]
fn test_sequence_empty_file_is_degenerate() {
    let dir = TempDir::new().unwrap();
    let path = write_mapping_file(&dir, "empty.txt", "# nothing here\n");
    let err = RemapFramesSimple::new(ClipInfo::with_frames(3), &FilterArgs::with_file(path), &FsTextSource)
        .unwrap_err();
    assert_eq!(err.to_string(), "RemapFramesSimple: Video length cannot be 0");
}

#[test]
fn test_selector_marking() {
    let clip = ClipInfo::with_frames(10);
    let filter = ReplaceFramesSimple::new(
        clip.clone(),
        clip,
        &FilterArgs::with_mappings("[2 4] 7"),
        &FsTextSource,
    )
    .unwrap();
    let flags: Vec<u8> = (0..10).map(|n| filter.table().flag(n).unwrap()).collect();
    assert_eq!(flags, vec![0, 0, 1, 1, 1, 0, 0, 1, 0, 0]);
}

#[test]
fn test_descending_ranges_differ_between_grammars() {
    // Reindex `[x y] z` rejects x > y; the selector grammar silently marks nothing.
    let err = remap(10, &FilterArgs::with_mappings("[4 2] 0")).unwrap_err();
    assert_eq!(err.diagnostic().unwrap().cause, Cause::IndexOutOfBounds);

    let clip = ClipInfo::with_frames(10);
    let filter = ReplaceFramesSimple::new(
        clip.clone(),
        clip,
        &FilterArgs::with_mappings("[4 2]"),
        &FsTextSource,
    )
    .unwrap();
    assert!((0..10).all(|n| filter.table().get(n) == Some(ClipSlot::Base)));
}

#[test]
fn test_comment_line_is_ignored() {
    let filter = remap(10, &FilterArgs::with_mappings("# 3 4")).unwrap();
    assert_eq!(filter.table(), &ReindexTable::identity(10));
}

#[test]
fn test_empty_inline_text() {
    assert!(remap(4, &FilterArgs::with_mappings("   ")).is_ok());

    let clip = ClipInfo::with_frames(4);
    assert!(ReplaceFramesSimple::new(clip.clone(), clip.clone(), &FilterArgs::with_mappings("\n"), &FsTextSource).is_ok());

    let err = RemapFramesSimple::new(clip, &FilterArgs::with_mappings("   "), &FsTextSource).unwrap_err();
    assert!(matches!(err, DomainError::Degenerate { .. }));
}

#[test]
fn test_error_column_points_at_token() {
    let err = remap(10, &FilterArgs::with_mappings("3 x")).unwrap_err();
    let diagnostic = err.diagnostic().unwrap();
    assert_eq!(diagnostic.cause, Cause::Parse);
    assert_eq!(diagnostic.column + 1, 3);
    assert_eq!(err.to_string(), "RemapFrames: Parse Error in mappings at line 1, column 3");
}

#[test]
fn test_file_errors_name_text_file() {
    let dir = TempDir::new().unwrap();
    let path = write_mapping_file(&dir, "map.txt", "0 1\r\n# ok\r\n2 99999999999\r\n");
    let err = remap(10, &FilterArgs::with_file(path)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "RemapFrames: Overflow Error in text file at line 3, column 3"
    );
}

#[test]
fn test_crlf_file_parses() {
    let dir = TempDir::new().unwrap();
    let path = write_mapping_file(&dir, "map.txt", "0 1\r\n1 0\r\n");
    let filter = remap(3, &FilterArgs::with_file(path)).unwrap();
    assert_eq!(indices(&filter), vec![1, 0, 2]);
}

#[test]
fn test_file_read_failure() {
    let err = RemapFrames::new(
        ClipInfo::with_frames(4),
        None,
        &FilterArgs::with_file("broken.txt"),
        &BrokenSource,
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::SourceRead { .. }));
    assert!(err.to_string().contains("device went away"));
}

#[test]
fn test_failed_construction_releases_clips() {
    let base = Arc::new(ClipInfo::with_frames(5));
    let source = Arc::new(ClipInfo::with_frames(5));

    let result = RemapFrames::new(
        Arc::clone(&base),
        Some(Arc::clone(&source)),
        &FilterArgs::with_mappings("0 1\n1 x"),
        &FsTextSource,
    );
    assert!(result.is_err());
    drop(result);
    assert_eq!(Arc::strong_count(&base), 1);
    assert_eq!(Arc::strong_count(&source), 1);
}

#[test]
fn test_table_builder_discards_on_error() {
    let builder = TableBuilder::new(&FsTextSource);
    let sources = MappingSources::inline("0 1 2\n3 [");
    let result = builder.build(SequenceTable::new(5), &sources);
    assert!(result.is_err());

    let table = builder
        .build(SequenceTable::new(5), &MappingSources::inline("4 3"))
        .unwrap();
    assert_eq!(table.as_slice(), &[4, 3]);
    assert_eq!(table.frame_bound(), 5);
}

#[test]
fn test_concurrent_requests_share_table() {
    let filter = Arc::new(remap(100, &FilterArgs::with_mappings("[0 99] [99 0]")).unwrap());

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let filter = Arc::clone(&filter);
            scope.spawn(move || {
                for n in (worker..100).step_by(4) {
                    assert_eq!(filter.request(n).unwrap().index, 99 - n);
                }
            });
        }
    });
}

#[test]
fn test_report_covers_every_frame() {
    let filter = remap(4, &FilterArgs::with_mappings("0 3")).unwrap();
    let report = frame_remap::output::MappingReport::from_filter(&filter).unwrap();
    assert_eq!(report.entries.len(), 4);
    assert_eq!(report.entries[0].index, 3);
    assert_eq!(report.entries[0].clip, ClipSlot::Base);
}
