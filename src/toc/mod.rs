pub mod format;

/// Rendering options for a formatted TOC block
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Numbered list items instead of bullets
    pub numbered: bool,
    /// Human comment appended to the closing marker
    pub comment: Option<String>,
    /// Use `*` instead of `-` for bullet items
    pub alt_list_char: bool,
    /// Close the TOC heading with a trailing run of `#`
    pub add_trailing_heading_chars: bool,
}

/// One heading entry in a table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocItem {
    /// Heading display text, marker characters stripped
    pub text: String,
    /// 1-based position among sibling items at the same level
    pub ordinal: usize,
}

impl TocItem {
    fn format(&self, indent_level: usize, options: &RenderOptions) -> String {
        let anchor = format::anchor_name(&self.text);
        let link = format::inline_link(&self.text, &format::anchor_ref(&anchor));
        let item = if options.numbered {
            format::numbered_list_item(&link, self.ordinal)
        } else {
            format::list_item(&link, options.alt_list_char)
        };
        let indent = " ".repeat(indent_level * format::INDENT_WIDTH);
        format!("{}{}", indent, item)
    }
}

/// A node in the TOC tree: a leaf entry or a nested level
#[derive(Debug, Clone)]
pub enum TocNode {
    Item(TocItem),
    Level(TocLevel),
}

/// One nesting tier of the TOC tree. Children appear in document order;
/// every direct child `Level` sits exactly one level deeper than its parent.
#[derive(Debug, Clone)]
pub struct TocLevel {
    level: usize,
    children: Vec<TocNode>,
    item_count: usize,
}

impl TocLevel {
    fn new(level: usize) -> Self {
        Self {
            level,
            children: Vec::new(),
            item_count: 0,
        }
    }

    /// Depth of this level; the root is 1
    pub fn level(&self) -> usize {
        self.level
    }

    /// Children of this level, in document order
    pub fn children(&self) -> &[TocNode] {
        &self.children
    }

    fn push_item(&mut self, text: String) {
        self.item_count += 1;
        let ordinal = self.item_count;
        self.children.push(TocNode::Item(TocItem { text, ordinal }));
    }

    /// Levels eligible as top-level emission roots given a skip level.
    /// Tiers at or above the skip level are descended past, so anything
    /// under a skipped level is flattened up one indent per skipped tier.
    fn emission_roots(&self, skip_level: usize) -> Vec<&TocLevel> {
        if skip_level < self.level {
            return vec![self];
        }
        let mut roots = Vec::new();
        for child in &self.children {
            if let TocNode::Level(level) = child {
                roots.extend(level.emission_roots(skip_level));
            }
        }
        roots
    }

    /// Apply `op` to the level `depth` steps down the chain of open levels.
    /// Every open level is the most recently appended child of its parent,
    /// so the chain follows last children.
    fn with_open_level<F: FnOnce(&mut TocLevel)>(&mut self, depth: usize, op: F) {
        if depth == 0 {
            op(self);
        } else if let Some(TocNode::Level(child)) = self.children.last_mut() {
            child.with_open_level(depth - 1, op);
        }
    }

    fn format(&self, skip_level: usize, options: &RenderOptions) -> String {
        let mut formatted = Vec::new();
        for child in &self.children {
            match child {
                TocNode::Level(level) => formatted.push(level.format(skip_level, options)),
                TocNode::Item(item) => {
                    let indent_level = self.level.saturating_sub(1 + skip_level);
                    formatted.push(item.format(indent_level, options));
                }
            }
        }
        formatted.join("\n")
    }
}

/// An entire table of contents for one document.
///
/// Headings are fed in document order through `add_heading`, which tracks
/// only the depth of the currently open level; the chain of open levels is
/// always the trail of last children, so no parent back-pointers are needed
/// and the tree stays strictly owned.
#[derive(Debug, Clone)]
pub struct Toc {
    /// Heading text for the TOC's own section heading
    pub meta_heading_text: String,
    /// Level of the TOC's own section heading
    pub meta_heading_level: usize,
    /// Headings at levels up to and including this one are elided
    pub skip_level: usize,
    root: TocLevel,
    open_depth: usize,
}

impl Toc {
    pub fn new(heading_text: &str, heading_level: usize, skip_level: usize) -> Self {
        Self {
            meta_heading_text: heading_text.to_string(),
            meta_heading_level: heading_level,
            skip_level,
            root: TocLevel::new(1),
            open_depth: 0,
        }
    }

    /// Root level of the heading tree
    pub fn root(&self) -> &TocLevel {
        &self.root
    }

    /// Level of the current insertion point
    fn open_level(&self) -> usize {
        self.open_depth + 1
    }

    /// Record one heading. Walks up while the heading is shallower than the
    /// open level, opens one fresh level per step down (a jump from level 1
    /// to 4 opens 2, then 3, then 4), and appends the item at the
    /// now-current level.
    pub fn add_heading(&mut self, text: &str, level: usize) {
        while level < self.open_level() {
            self.open_depth -= 1;
        }
        while level > self.open_level() {
            let child_level = self.open_level() + 1;
            let depth = self.open_depth;
            self.root.with_open_level(depth, |current| {
                current
                    .children
                    .push(TocNode::Level(TocLevel::new(child_level)));
            });
            self.open_depth += 1;
        }
        let depth = self.open_depth;
        self.root.with_open_level(depth, |current| {
            current.push_item(text.to_string());
        });
    }

    /// Render the full replacement block: opening marker, blank line, the
    /// TOC's own heading, blank line, the heading tree, blank line, closing
    /// marker, trailing newline.
    pub fn format(&self, options: &RenderOptions) -> String {
        let mut formatted = Vec::new();
        formatted.push(format::marker_comment(format::LABEL_BEGIN_TOC, None));

        formatted.push(String::new());

        let markers = format::HEADING_CHAR
            .to_string()
            .repeat(self.meta_heading_level);
        let mut heading = format!("{} {}", markers, self.meta_heading_text);
        if options.add_trailing_heading_chars {
            heading.push(' ');
            heading.push_str(&markers);
        }
        formatted.push(heading);

        formatted.push(String::new());

        for level in self.root.emission_roots(self.skip_level) {
            formatted.push(level.format(self.skip_level, options));
        }

        formatted.push(String::new());
        formatted.push(format::marker_comment(
            format::LABEL_END_TOC,
            options.comment.as_deref(),
        ));
        formatted.push(String::new());

        formatted.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toc_with_headings(headings: &[(&str, usize)]) -> Toc {
        let mut toc = Toc::new("Contents", 1, 1);
        for (text, level) in headings {
            toc.add_heading(text, *level);
        }
        toc
    }

    fn item(node: &TocNode) -> &TocItem {
        match node {
            TocNode::Item(item) => item,
            TocNode::Level(level) => panic!("expected item, got level {}", level.level()),
        }
    }

    fn level(node: &TocNode) -> &TocLevel {
        match node {
            TocNode::Level(level) => level,
            TocNode::Item(item) => panic!("expected level, got item {:?}", item.text),
        }
    }

    #[test]
    fn test_tree_mirrors_document_order() {
        // Heading levels 1, 2, 2, 3, 2: the third level-2 sibling lands in
        // the same level as the first two, after the nested level-3 subtree
        let toc = toc_with_headings(&[
            ("Title", 1),
            ("A", 2),
            ("B", 2),
            ("B.1", 3),
            ("C", 2),
        ]);

        let root = toc.root();
        assert_eq!(root.children().len(), 2);
        assert_eq!(item(&root.children()[0]).text, "Title");

        let second = level(&root.children()[1]);
        assert_eq!(second.level(), 2);
        assert_eq!(second.children().len(), 4);
        assert_eq!(item(&second.children()[0]).text, "A");
        assert_eq!(item(&second.children()[1]).text, "B");
        let third = level(&second.children()[2]);
        assert_eq!(third.level(), 3);
        assert_eq!(item(&third.children()[0]).text, "B.1");
        assert_eq!(item(&second.children()[3]).text, "C");
    }

    #[test]
    fn test_level_jump_opens_one_level_per_step() {
        let toc = toc_with_headings(&[("Top", 1), ("Deep", 4)]);

        let root = toc.root();
        let l2 = level(&root.children()[1]);
        assert_eq!(l2.level(), 2);
        let l3 = level(&l2.children()[0]);
        assert_eq!(l3.level(), 3);
        let l4 = level(&l3.children()[0]);
        assert_eq!(l4.level(), 4);
        assert_eq!(item(&l4.children()[0]).text, "Deep");
    }

    #[test]
    fn test_descending_after_ascending_opens_fresh_level() {
        // 2, 1, 2: the two level-2 headings are siblings in document order
        // only through the root; each descent opens a new level
        let toc = toc_with_headings(&[("A", 2), ("Mid", 1), ("B", 2)]);

        let root = toc.root();
        assert_eq!(root.children().len(), 3);
        assert_eq!(item(&level(&root.children()[0]).children()[0]).text, "A");
        assert_eq!(item(&root.children()[1]).text, "Mid");
        assert_eq!(item(&level(&root.children()[2]).children()[0]).text, "B");
    }

    #[test]
    fn test_zigzag_levels_keep_correct_insertion_point() {
        // Rises and falls across several levels must keep appending into
        // the chain of most recently opened levels
        let toc = toc_with_headings(&[
            ("T", 1),
            ("D", 3),
            ("B", 2),
            ("E", 4),
            ("C", 2),
            ("U", 1),
            ("V", 2),
        ]);

        let root = toc.root();
        assert_eq!(root.children().len(), 4);
        assert_eq!(item(&root.children()[0]).text, "T");
        assert_eq!(item(&root.children()[2]).text, "U");

        let l2 = level(&root.children()[1]);
        assert_eq!(l2.children().len(), 4);
        assert_eq!(item(&level(&l2.children()[0]).children()[0]).text, "D");
        assert_eq!(item(&l2.children()[1]).text, "B");
        let l3b = level(&l2.children()[2]);
        assert_eq!(item(&level(&l3b.children()[0]).children()[0]).text, "E");
        assert_eq!(item(&l2.children()[3]).text, "C");

        let l2b = level(&root.children()[3]);
        assert_eq!(item(&l2b.children()[0]).text, "V");
    }

    #[test]
    fn test_ordinals_count_siblings_per_level() {
        let toc = toc_with_headings(&[("A", 2), ("A.1", 3), ("B", 2), ("C", 2)]);

        let l2 = level(&toc.root().children()[0]);
        assert_eq!(item(&l2.children()[0]).ordinal, 1);
        assert_eq!(item(&l2.children()[2]).ordinal, 2);
        assert_eq!(item(&l2.children()[3]).ordinal, 3);
        let l3 = level(&l2.children()[1]);
        assert_eq!(item(&l3.children()[0]).ordinal, 1);
    }

    #[test]
    fn test_format_flat_bulleted() {
        let toc = toc_with_headings(&[("Title", 1), ("A", 2), ("B", 2)]);
        let block = toc.format(&RenderOptions::default());

        assert_eq!(
            block,
            "[begintoc]: #\n\n# Contents\n\n- [A](#a)\n- [B](#b)\n\n[endtoc]: #\n"
        );
    }

    #[test]
    fn test_format_nested_indent() {
        let toc = toc_with_headings(&[("Title", 1), ("A", 2), ("A.1", 3)]);
        let block = toc.format(&RenderOptions::default());

        assert!(block.contains("- [A](#a)\n    - [A.1](#a1)"));
    }

    #[test]
    fn test_format_numbered() {
        let toc = toc_with_headings(&[("Title", 1), ("A", 2), ("B", 2)]);
        let options = RenderOptions {
            numbered: true,
            ..Default::default()
        };
        let block = toc.format(&options);

        assert!(block.contains("1. [A](#a)\n2. [B](#b)"));
    }

    #[test]
    fn test_format_alt_list_char() {
        let toc = toc_with_headings(&[("Title", 1), ("A", 2)]);
        let options = RenderOptions {
            alt_list_char: true,
            ..Default::default()
        };

        assert!(toc.format(&options).contains("* [A](#a)"));
    }

    #[test]
    fn test_format_trailing_heading_chars() {
        let mut toc = Toc::new("Contents", 2, 1);
        toc.add_heading("A", 2);
        let options = RenderOptions {
            add_trailing_heading_chars: true,
            ..Default::default()
        };

        assert!(toc.format(&options).contains("\n## Contents ##\n"));
    }

    #[test]
    fn test_format_end_marker_comment() {
        let toc = toc_with_headings(&[("A", 2)]);
        let options = RenderOptions {
            comment: Some("generated by mdtoc".to_string()),
            ..Default::default()
        };

        assert!(toc
            .format(&options)
            .ends_with("[endtoc]: # (generated by mdtoc)\n"));
    }

    #[test]
    fn test_skip_level_zero_includes_top_headings() {
        let mut toc = Toc::new("Contents", 1, 0);
        toc.add_heading("Title", 1);
        toc.add_heading("A", 2);
        let block = toc.format(&RenderOptions::default());

        assert!(block.contains("- [Title](#title)\n    - [A](#a)"));
    }

    #[test]
    fn test_skip_level_monotonicity() {
        // Raising the skip level never deepens any surviving item's indent
        // and never brings back headings that were excluded before
        let headings = [("Title", 1), ("A", 2), ("A.1", 3), ("B", 2)];
        let mut previous_lines: Option<Vec<String>> = None;
        for skip_level in 0..3 {
            let mut toc = Toc::new("Contents", 1, skip_level);
            for (text, level) in &headings {
                toc.add_heading(text, *level);
            }
            let block = toc.format(&RenderOptions::default());
            let lines: Vec<String> = block
                .lines()
                .filter(|line| line.trim_start().starts_with('-'))
                .map(str::to_string)
                .collect();
            if let Some(previous) = &previous_lines {
                for line in &lines {
                    let trimmed = line.trim_start();
                    let indent = line.len() - trimmed.len();
                    let before = previous
                        .iter()
                        .find(|other| other.trim_start() == trimmed)
                        .unwrap_or_else(|| panic!("{} appeared with a higher skip level", trimmed));
                    let before_indent = before.len() - before.trim_start().len();
                    assert!(indent <= before_indent);
                }
            }
            previous_lines = Some(lines);
        }
    }

    #[test]
    fn test_format_with_no_headings() {
        let toc = Toc::new("Contents", 1, 1);
        let block = toc.format(&RenderOptions::default());

        assert!(block.starts_with("[begintoc]: #\n"));
        assert!(block.ends_with("[endtoc]: #\n"));
    }
}
