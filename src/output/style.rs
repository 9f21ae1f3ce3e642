//! Category to terminal style mapping

use termcolor::{Color, ColorSpec};

use crate::tree::Category;

/// Terminal style for a category. `None` means write unstyled.
pub fn style_for(category: Category) -> Option<ColorSpec> {
    let (fg, bg) = match category {
        Category::BlockDevice => (Color::Yellow, Some(Color::White)),
        Category::CharDevice => (Color::Black, Some(Color::White)),
        Category::Fifo => (Color::Magenta, Some(Color::White)),
        Category::Socket => (Color::Blue, Some(Color::White)),
        Category::MountPoint => (Color::Black, Some(Color::Blue)),
        Category::Directory => (Color::Blue, None),
        Category::Symlink => (Color::Cyan, None),
        Category::BrokenSymlink => (Color::Red, None),
        Category::Executable => (Color::Green, None),
        Category::File | Category::PlainText => return None,
    };

    let mut spec = ColorSpec::new();
    spec.set_fg(Some(fg)).set_bg(bg);
    Some(spec)
}
