//! TreeWalker - renders a directory subtree line by line into an output sink

use std::path::Path;

use crate::error::TraversalError;

use super::config::{ErrorPolicy, WalkerConfig};
use super::entry::{Category, DirectoryEntry, sort_entries};
use super::probe::{FilesystemProbe, HostProbe};
use super::sink::{OutputSink, RenderSummary};
use super::traversal::RenderState;

const PERMISSION_DENIED: &str = " : Permission denied";
const LINK_ARROW: &str = " -> ";

/// Depth-first tree renderer.
///
/// Symlinks are listed but never descended into, so link cycles cannot
/// make the walk loop.
pub struct TreeWalker<P = HostProbe> {
    config: WalkerConfig,
    probe: P,
}

impl TreeWalker<HostProbe> {
    pub fn new(config: WalkerConfig) -> Self {
        Self::with_probe(config, HostProbe)
    }
}

impl<P: FilesystemProbe> TreeWalker<P> {
    pub fn with_probe(config: WalkerConfig, probe: P) -> Self {
        Self { config, probe }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Render `root` and everything below it.
    ///
    /// The root path is written first, exactly as given. If the root cannot
    /// be listed the error is returned after that header line.
    pub fn render<O: OutputSink>(
        &self,
        root: &Path,
        output: &mut O,
    ) -> Result<RenderSummary, TraversalError> {
        output.write_fragment(&root.display().to_string(), Category::Directory)?;
        output.end_line()?;

        let summary = self.render_dir(root, &RenderState::root(&self.config), output)?;
        output.finish(&summary)?;
        tracing::debug!(
            directories = summary.directories,
            files = summary.files,
            skipped = summary.errors.len(),
            "render finished"
        );
        Ok(summary)
    }

    fn render_dir<O: OutputSink>(
        &self,
        path: &Path,
        state: &RenderState,
        output: &mut O,
    ) -> Result<RenderSummary, TraversalError> {
        let mut children = self
            .probe
            .list_children(path)
            .map_err(|cause| TraversalError::probe(path, cause))?;
        sort_entries(&mut children);

        let mut summary = RenderSummary::default();
        let count = children.len();

        for (i, child) in children.iter().enumerate() {
            let is_last = i + 1 == count;
            write_entry(child, state, is_last, output)?;

            if !child.kind.is_directory() {
                summary.files += 1;
                continue;
            }
            summary.directories += 1;

            if !child.readable || !state.can_descend() {
                continue;
            }

            match self.render_dir(&child.path, &state.descend(is_last), output) {
                Ok(sub) => summary.merge(sub),
                Err(err @ TraversalError::Probe { .. })
                    if self.config.on_error == ErrorPolicy::Continue =>
                {
                    tracing::warn!(error = %err, "skipping subtree");
                    summary.errors.push(err);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(summary)
    }
}

/// Write one entry line: prefix, connector, styled name and annotations.
fn write_entry<O: OutputSink>(
    entry: &DirectoryEntry,
    state: &RenderState,
    is_last: bool,
    output: &mut O,
) -> std::io::Result<()> {
    let lead = format!("{}{}", state.prefix, state.connector(is_last));
    output.write_fragment(&lead, Category::PlainText)?;
    output.write_fragment(&entry.name, entry.category())?;

    if entry.kind.is_directory() && !entry.readable {
        output.write_fragment(PERMISSION_DENIED, Category::PlainText)?;
    }

    if let Some(target) = entry.target_name() {
        output.write_fragment(LINK_ARROW, Category::PlainText)?;
        let category = if entry.symlink_target_exists {
            Category::PlainText
        } else {
            Category::BrokenSymlink
        };
        output.write_fragment(&target, category)?;
    }

    output.end_line()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::error::ProbeError;
    use crate::test_utils::{MemoryProbe, RecordingSink};
    use crate::tree::EntryKind;

    fn dir(path: &str) -> DirectoryEntry {
        DirectoryEntry::new(path, EntryKind::Directory)
    }

    fn file(path: &str) -> DirectoryEntry {
        DirectoryEntry::new(path, EntryKind::RegularFile)
    }

    fn render(probe: &MemoryProbe, config: WalkerConfig) -> (RecordingSink, RenderSummary) {
        let walker = TreeWalker::with_probe(config, probe);
        let mut sink = RecordingSink::default();
        let summary = walker.render(Path::new("/r"), &mut sink).unwrap();
        (sink, summary)
    }

    #[test]
    fn scenario_dirs_then_links_then_files() {
        let probe = MemoryProbe::new()
            .with_dir(
                "/r",
                vec![
                    file("/r/b.txt"),
                    dir("/r/A"),
                    DirectoryEntry::symlink("/r/z_link", "A", true, true),
                ],
            )
            .with_dir("/r/A", vec![]);

        let (sink, summary) = render(&probe, WalkerConfig::default());
        assert_eq!(sink.text(), "/r\n├──A\n├──z_link -> A\n└──b.txt\n");
        assert_eq!(
            probe.listed(),
            vec![PathBuf::from("/r"), PathBuf::from("/r/A")]
        );
        assert_eq!(summary.directories, 1);
        assert_eq!(summary.files, 2);
    }

    #[test]
    fn symlink_cycles_are_never_followed() {
        let probe = MemoryProbe::new()
            .with_dir(
                "/r",
                vec![
                    dir("/r/a"),
                    DirectoryEntry::symlink("/r/loop", "/r", true, true),
                ],
            )
            .with_dir(
                "/r/a",
                vec![DirectoryEntry::symlink("/r/a/up", "..", true, true)],
            );

        let (sink, _) = render(&probe, WalkerConfig::default());
        assert_eq!(sink.text(), "/r\n├──a\n│  └──up -> ..\n└──loop -> r\n");
        assert_eq!(probe.listed().len(), 2);
    }

    #[test]
    fn unreadable_child_is_annotated_and_not_descended() {
        let probe = MemoryProbe::new().with_dir(
            "/r",
            vec![dir("/r/secret").with_readable(false), file("/r/x")],
        );

        let (sink, _) = render(&probe, WalkerConfig::default());
        assert_eq!(sink.text(), "/r\n├──secret : Permission denied\n└──x\n");
        assert_eq!(probe.listed().len(), 1);
    }

    #[test]
    fn max_depth_zero_lists_only_root_children() {
        let probe = MemoryProbe::new()
            .with_dir("/r", vec![dir("/r/a")])
            .with_dir("/r/a", vec![file("/r/a/deep")]);

        let config = WalkerConfig {
            max_depth: Some(0),
            ..Default::default()
        };
        let (sink, _) = render(&probe, config);
        assert_eq!(sink.text(), "/r\n└──a\n");
    }

    #[test]
    fn max_depth_n_expands_n_levels() {
        let probe = MemoryProbe::new()
            .with_dir("/r", vec![dir("/r/a")])
            .with_dir("/r/a", vec![dir("/r/a/b")])
            .with_dir("/r/a/b", vec![dir("/r/a/b/c")])
            .with_dir("/r/a/b/c", vec![file("/r/a/b/c/f")]);

        let config = WalkerConfig {
            max_depth: Some(2),
            ..Default::default()
        };
        let (sink, _) = render(&probe, config);
        assert_eq!(sink.text(), "/r\n└──a\n   └──b\n      └──c\n");
        assert_eq!(probe.listed().len(), 3);
    }

    #[test]
    fn prefix_tracks_sibling_position() {
        let probe = MemoryProbe::new()
            .with_dir("/r", vec![dir("/r/a"), dir("/r/b")])
            .with_dir("/r/a", vec![file("/r/a/1"), file("/r/a/2")])
            .with_dir("/r/b", vec![file("/r/b/3")]);

        let (sink, _) = render(&probe, WalkerConfig::default());
        assert_eq!(sink.text(), "/r\n├──a\n│  ├──1\n│  └──2\n└──b\n   └──3\n");
    }

    #[test]
    fn without_lines_connectors_are_blank() {
        let probe = MemoryProbe::new()
            .with_dir("/r", vec![dir("/r/a"), file("/r/z")])
            .with_dir("/r/a", vec![file("/r/a/1")]);

        let config = WalkerConfig {
            draw_lines: false,
            ..Default::default()
        };
        let (sink, _) = render(&probe, config);
        assert_eq!(sink.text(), "/r\n   a\n      1\n   z\n");
    }

    #[test]
    fn broken_symlink_target_is_styled_broken() {
        let probe = MemoryProbe::new().with_dir(
            "/r",
            vec![
                DirectoryEntry::symlink("/r/ok", "/etc/hosts", true, false),
                DirectoryEntry::symlink("/r/bad", "/nowhere/gone", false, false),
            ],
        );

        let (sink, _) = render(&probe, WalkerConfig::default());
        let bad = &sink.lines[1];
        assert_eq!(bad[1], ("bad".to_string(), Category::BrokenSymlink));
        assert_eq!(bad[3], ("gone".to_string(), Category::BrokenSymlink));

        let ok = &sink.lines[2];
        assert_eq!(ok[1], ("ok".to_string(), Category::Symlink));
        assert_eq!(ok[3], ("hosts".to_string(), Category::PlainText));
    }

    #[test]
    fn special_kinds_get_their_categories() {
        let probe = MemoryProbe::new()
            .with_dir(
                "/r",
                vec![
                    DirectoryEntry::new("/r/sda", EntryKind::BlockDevice),
                    DirectoryEntry::new("/r/tty", EntryKind::CharDevice),
                    DirectoryEntry::new("/r/pipe", EntryKind::Fifo),
                    DirectoryEntry::new("/r/sock", EntryKind::Socket),
                    DirectoryEntry::new("/r/mnt", EntryKind::MountPoint),
                    file("/r/run").with_executable(true),
                ],
            )
            .with_dir("/r/mnt", vec![]);

        let (sink, summary) = render(&probe, WalkerConfig::default());
        let categories: Vec<(String, Category)> =
            sink.lines[1..].iter().map(|l| l[1].clone()).collect();
        assert_eq!(
            categories,
            [
                ("mnt".to_string(), Category::MountPoint),
                ("pipe".to_string(), Category::Fifo),
                ("run".to_string(), Category::Executable),
                ("sda".to_string(), Category::BlockDevice),
                ("sock".to_string(), Category::Socket),
                ("tty".to_string(), Category::CharDevice),
            ]
        );
        assert_eq!(sink.lines[0], [("/r".to_string(), Category::Directory)]);
        assert_eq!(summary.directories, 1);
        assert_eq!(summary.files, 5);
    }

    #[test]
    fn root_failure_is_reported_after_header() {
        let probe = MemoryProbe::new().with_failure("/r", ProbeError::PermissionDenied);
        let walker = TreeWalker::with_probe(WalkerConfig::default(), &probe);
        let mut sink = RecordingSink::default();

        let err = walker.render(Path::new("/r"), &mut sink).unwrap_err();
        assert_eq!(err.to_string(), "Path `/r`: Permission denied.");
        assert_eq!(sink.text(), "/r\n");
    }

    #[test]
    fn subtree_failure_aborts_by_default() {
        let probe = MemoryProbe::new()
            .with_dir("/r", vec![dir("/r/a"), dir("/r/b")])
            .with_failure("/r/a", ProbeError::NotFound)
            .with_dir("/r/b", vec![]);
        let walker = TreeWalker::with_probe(WalkerConfig::default(), &probe);
        let mut sink = RecordingSink::default();

        let err = walker.render(Path::new("/r"), &mut sink).unwrap_err();
        assert_eq!(err.path(), Some(Path::new("/r/a")));
        assert_eq!(sink.text(), "/r\n├──a\n");
    }

    #[test]
    fn subtree_failure_is_skipped_when_continuing() {
        let probe = MemoryProbe::new()
            .with_dir("/r", vec![dir("/r/a"), dir("/r/b")])
            .with_failure("/r/a", ProbeError::Other("stale handle".into()))
            .with_dir("/r/b", vec![file("/r/b/f")]);

        let config = WalkerConfig {
            on_error: ErrorPolicy::Continue,
            ..Default::default()
        };
        let (sink, summary) = render(&probe, config);
        assert_eq!(sink.text(), "/r\n├──a\n└──b\n   └──f\n");
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(
            summary.errors[0].to_string(),
            "Path `/r/a` can't be read: stale handle"
        );
    }

    #[test]
    fn rendering_is_repeatable() {
        let probe = MemoryProbe::new()
            .with_dir("/r", vec![file("/r/z"), dir("/r/m"), file("/r/a")])
            .with_dir("/r/m", vec![file("/r/m/x")]);

        let (first, _) = render(&probe, WalkerConfig::default());
        let (second, _) = render(&probe, WalkerConfig::default());
        assert_eq!(first.text(), second.text());
    }
}
