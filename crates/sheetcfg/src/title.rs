//! Title hierarchy
//!
//! Header rows map field names onto column ranges. A plain header cell names a
//! single column; a merged header cell names the whole merged span and the
//! header rows below it name the sub-fields inside that span, to any depth.
//!
//! Titles live in an arena ([`TitleTree`]) and refer to their children by
//! [`TitleId`]. Each node also keeps a name index for O(1) lookup.

use crate::error::{Result, SheetError};
use crate::grid::{Cell, Grid, MergedRegion};
use ahash::AHashMap;
use std::fmt;
use std::ops::Index;

/// Name of the synthetic root title
pub const ROOT_TITLE_NAME: &str = "_root_";

/// Index of a title inside its [`TitleTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TitleId(usize);

/// A named column range in the header hierarchy
#[derive(Debug, Clone)]
pub struct Title {
    name: String,
    from_column: usize,
    to_column: usize,
    children: Vec<TitleId>,
    by_name: AHashMap<String, TitleId>,
}

impl Title {
    fn new(name: String, from_column: usize, to_column: usize) -> Self {
        Self {
            name,
            from_column,
            to_column,
            children: Vec::new(),
            by_name: AHashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// First grid column covered by this title
    pub fn from_column(&self) -> usize {
        self.from_column
    }

    /// Last grid column covered by this title (inclusive)
    pub fn to_column(&self) -> usize {
        self.to_column
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Child ids, left to right once the tree is built
    pub fn children(&self) -> &[TitleId] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<TitleId> {
        self.by_name.get(name).copied()
    }
}

/// Arena of titles rooted at [`ROOT_TITLE_NAME`]
#[derive(Debug, Clone)]
pub struct TitleTree {
    nodes: Vec<Title>,
}

impl TitleTree {
    /// Create a tree holding only the root, spanning `from..=to`
    pub fn new(from_column: usize, to_column: usize) -> Self {
        let root = Title::new(ROOT_TITLE_NAME.to_string(), from_column, to_column);
        Self { nodes: vec![root] }
    }

    pub fn root_id(&self) -> TitleId {
        TitleId(0)
    }

    pub fn root(&self) -> TitleRef<'_> {
        self.get(self.root_id())
    }

    pub fn get(&self, id: TitleId) -> TitleRef<'_> {
        TitleRef { tree: self, id }
    }

    /// Number of titles, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Register a child title under `parent`
    ///
    /// Re-declaring a name with the same column range returns the existing
    /// child; the same name with a different range is a [`SheetError::DuplicateTitle`].
    pub fn add_child(
        &mut self,
        parent: TitleId,
        name: &str,
        from_column: usize,
        to_column: usize,
    ) -> Result<TitleId> {
        match self.insert(parent, name, from_column, to_column)? {
            Inserted::New(id) | Inserted::Existing(id) => Ok(id),
        }
    }

    fn insert(
        &mut self,
        parent: TitleId,
        name: &str,
        from_column: usize,
        to_column: usize,
    ) -> Result<Inserted> {
        if let Some(existing) = self[parent].child(name) {
            let old = &self[existing];
            if (old.from_column, old.to_column) == (from_column, to_column) {
                return Ok(Inserted::Existing(existing));
            }
            return Err(SheetError::DuplicateTitle {
                name: name.to_string(),
                existing: (old.from_column, old.to_column),
                conflicting: (from_column, to_column),
            });
        }

        let id = TitleId(self.nodes.len());
        let title = Title::new(name.to_string(), from_column, to_column);
        self.nodes.push(title);
        let parent = &mut self.nodes[parent.0];
        parent.children.push(id);
        parent.by_name.insert(name.to_string(), id);
        log::trace!(
            "title '{}' [{}, {}] under '{}'",
            name,
            from_column,
            to_column,
            parent.name
        );
        Ok(Inserted::New(id))
    }

    /// Order every node's children by their first column
    ///
    /// Merged titles are discovered in merge declaration order, not layout
    /// order. Repeated sub-structures rebuild element order from column order,
    /// so children must run left to right.
    pub fn sort_children(&mut self) {
        for i in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[i].children);
            children.sort_by_key(|id| self.nodes[id.0].from_column);
            self.nodes[i].children = children;
        }
    }
}

impl Index<TitleId> for TitleTree {
    type Output = Title;

    fn index(&self, id: TitleId) -> &Title {
        &self.nodes[id.0]
    }
}

enum Inserted {
    New(TitleId),
    Existing(TitleId),
}

/// A title together with the tree it belongs to
#[derive(Clone, Copy)]
pub struct TitleRef<'t> {
    tree: &'t TitleTree,
    id: TitleId,
}

impl<'t> TitleRef<'t> {
    pub fn id(&self) -> TitleId {
        self.id
    }

    pub fn title(&self) -> &'t Title {
        &self.tree[self.id]
    }

    pub fn name(&self) -> &'t str {
        self.title().name()
    }

    pub fn from_column(&self) -> usize {
        self.title().from_column
    }

    pub fn to_column(&self) -> usize {
        self.title().to_column
    }

    pub fn is_leaf(&self) -> bool {
        self.title().is_leaf()
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = TitleRef<'t>> + 't {
        let tree = self.tree;
        self.title()
            .children
            .iter()
            .map(move |&id| TitleRef { tree, id })
    }

    pub fn child(&self, name: &str) -> Option<TitleRef<'t>> {
        self.title().child(name).map(|id| self.tree.get(id))
    }
}

impl fmt::Debug for TitleRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for TitleRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}, {}]",
            self.name(),
            self.from_column(),
            self.to_column()
        )?;
        if !self.is_leaf() {
            f.write_str(" {")?;
            for (i, child) in self.children().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", child)?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

/// Build the title tree from the header rows of `grid`
///
/// Returns the tree and the header band height: the number of grid rows the
/// merged headers occupy, at least 1.
pub fn build_titles(
    sheet: &str,
    grid: &Grid,
    merges: &[MergedRegion],
) -> Result<(TitleTree, usize)> {
    if grid.is_empty() {
        return Err(SheetError::NoFieldsDefined {
            sheet: sheet.to_string(),
        });
    }

    let header_rows = merges
        .iter()
        .filter(|m| m.first_row == 0)
        .map(MergedRegion::height)
        .fold(1, usize::max);

    let mut tree = TitleTree::new(1, grid.width().saturating_sub(1));
    let builder = TitleBuilder {
        grid,
        merges,
        header_rows,
    };
    let root = tree.root_id();
    let (from, to) = (tree[root].from_column, tree[root].to_column);
    // Root-level plain columns do not descend into deeper header rows
    builder.populate(&mut tree, root, 0, from, to, false)?;

    if tree[root].is_leaf() {
        return Err(SheetError::NoColumnsDefined {
            sheet: sheet.to_string(),
        });
    }
    tree.sort_children();
    Ok((tree, header_rows))
}

struct TitleBuilder<'g> {
    grid: &'g Grid,
    merges: &'g [MergedRegion],
    header_rows: usize,
}

impl TitleBuilder<'_> {
    fn populate(
        &self,
        tree: &mut TitleTree,
        parent: TitleId,
        depth: usize,
        from: usize,
        to: usize,
        descend_plain: bool,
    ) -> Result<()> {
        let row = self.grid.row(depth).unwrap_or(&[]);
        let descend = depth + 1 < self.header_rows;

        let mut claimed = Vec::new();
        for merge in self
            .merges
            .iter()
            .filter(|m| m.first_row == depth && m.within_columns(from, to))
        {
            let (first, last) = (merge.first_col, merge.last_col);
            claimed.push((first, last));
            let Some(name) = header_text(row, first) else {
                continue;
            };
            if let Inserted::New(child) = tree.insert(parent, &name, first, last)? {
                if descend {
                    self.populate(tree, child, depth + 1, first, last, true)?;
                }
            }
        }

        for col in from..=to.min(row.len().saturating_sub(1)) {
            if claimed.iter().any(|&(a, b)| (a..=b).contains(&col)) {
                continue;
            }
            let Some(name) = header_text(row, col) else {
                continue;
            };
            if let Inserted::New(child) = tree.insert(parent, &name, col, col)? {
                if descend && descend_plain {
                    self.populate(tree, child, depth + 1, col, col, true)?;
                }
            }
        }
        Ok(())
    }
}

fn header_text(row: &[Cell], col: usize) -> Option<String> {
    row.get(col).and_then(|cell| cell.value.text())
}
