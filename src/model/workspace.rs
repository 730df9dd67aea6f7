//! Workspace management - file tree sidebar and entry creation
//!
//! The tree is a read-only snapshot of the storage collaborator's listing:
//! - Order is exactly the order the collaborator returned (never sorted)
//! - Files are addressed by their root-relative, `/`-joined path
//! - Folders only group children; they carry no selection state

use serde::{Deserialize, Serialize};

/// Extension of files the execution service can run and deploy
pub const EXECUTABLE_EXTENSION: &str = ".py";

/// Whether a path names a runnable/deployable source file
pub fn is_executable_path(path: &str) -> bool {
    path.ends_with(EXECUTABLE_EXTENSION)
}

/// Join a parent prefix and a child name into a tree path
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

// ============================================================================
// File Tree Nodes
// ============================================================================

/// A node in the file tree, as listed by the storage service
///
/// Wire form: `{"type": "file", "name": ...}` or
/// `{"type": "folder", "name": ..., "children": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileNode {
    File {
        name: String,
    },
    Folder {
        name: String,
        #[serde(default)]
        children: Vec<FileNode>,
    },
}

impl FileNode {
    pub fn file(name: impl Into<String>) -> Self {
        FileNode::File { name: name.into() }
    }

    pub fn folder(name: impl Into<String>, children: Vec<FileNode>) -> Self {
        FileNode::Folder {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FileNode::File { name } | FileNode::Folder { name, .. } => name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, FileNode::Folder { .. })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            FileNode::File { .. } => NodeKind::File,
            FileNode::Folder { .. } => NodeKind::Folder,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Folder,
}

/// One line of the rendered sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    /// Nesting depth (0 = root level)
    pub depth: usize,
    pub name: String,
    /// Full path; for folders this is the prefix their children share
    pub path: String,
    pub kind: NodeKind,
    /// True only for the selected file
    pub selected: bool,
}

// ============================================================================
// File Tree
// ============================================================================

/// The complete file tree for the workspace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    /// Root nodes in collaborator order
    pub roots: Vec<FileNode>,
}

impl FileTree {
    pub fn new(roots: Vec<FileNode>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pre-order walk producing one row per node
    pub fn render(&self, selected: Option<&str>) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        Self::render_nodes(&self.roots, "", 0, selected, &mut rows);
        rows
    }

    fn render_nodes(
        nodes: &[FileNode],
        prefix: &str,
        depth: usize,
        selected: Option<&str>,
        rows: &mut Vec<TreeRow>,
    ) {
        for node in nodes {
            let path = join_path(prefix, node.name());
            let is_selected = !node.is_folder() && selected == Some(path.as_str());
            rows.push(TreeRow {
                depth,
                name: node.name().to_string(),
                path: path.clone(),
                kind: node.kind(),
                selected: is_selected,
            });
            if let FileNode::Folder { children, .. } = node {
                Self::render_nodes(children, &path, depth + 1, selected, rows);
            }
        }
    }

    /// Get all file paths recursively (excludes folders)
    pub fn file_paths(&self) -> Vec<String> {
        let mut files = Vec::new();
        Self::collect_files_recursive(&self.roots, "", &mut files);
        files
    }

    fn collect_files_recursive(nodes: &[FileNode], prefix: &str, files: &mut Vec<String>) {
        for node in nodes {
            let path = join_path(prefix, node.name());
            match node {
                FileNode::File { .. } => files.push(path),
                FileNode::Folder { children, .. } => {
                    Self::collect_files_recursive(children, &path, files)
                }
            }
        }
    }

    /// Whether `path` names a file (not a folder) in this tree
    pub fn contains_file(&self, path: &str) -> bool {
        matches!(self.find(path), Some(FileNode::File { .. }))
    }

    /// Find the node at a `/`-joined path
    pub fn find(&self, path: &str) -> Option<&FileNode> {
        let mut nodes: &[FileNode] = &self.roots;
        let mut found = None;
        for segment in path.split('/') {
            let node = nodes.iter().find(|n| n.name() == segment)?;
            nodes = match node {
                FileNode::Folder { children, .. } => children.as_slice(),
                FileNode::File { .. } => &[],
            };
            found = Some(node);
        }
        found
    }
}

/// Sidebar state: the tree plus the "new entry" path field
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub tree: FileTree,
    /// Text of the path input used by Create File / Create Folder
    pub new_path: String,
    /// Set once the first listing has arrived
    pub loaded: bool,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tree(&mut self, roots: Vec<FileNode>) {
        self.tree = FileTree::new(roots);
        self.loaded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FileTree {
        FileTree::new(vec![
            FileNode::file("main.py"),
            FileNode::folder(
                "contracts",
                vec![
                    FileNode::file("token.py"),
                    FileNode::folder("lib", vec![FileNode::file("math.py")]),
                ],
            ),
            FileNode::file("README.txt"),
        ])
    }

    #[test]
    fn test_render_preserves_order_and_depth() {
        let rows = sample_tree().render(None);
        let summary: Vec<(usize, &str)> =
            rows.iter().map(|r| (r.depth, r.path.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (0, "main.py"),
                (0, "contracts"),
                (1, "contracts/token.py"),
                (1, "contracts/lib"),
                (2, "contracts/lib/math.py"),
                (0, "README.txt"),
            ]
        );
    }

    #[test]
    fn test_render_marks_only_selected_file() {
        let rows = sample_tree().render(Some("contracts/lib/math.py"));
        let selected: Vec<&str> = rows
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.path.as_str())
            .collect();
        assert_eq!(selected, vec!["contracts/lib/math.py"]);
    }

    #[test]
    fn test_folder_path_is_never_selected() {
        let rows = sample_tree().render(Some("contracts"));
        assert!(rows.iter().all(|r| !r.selected));
    }

    #[test]
    fn test_file_paths() {
        assert_eq!(
            sample_tree().file_paths(),
            vec![
                "main.py",
                "contracts/token.py",
                "contracts/lib/math.py",
                "README.txt"
            ]
        );
    }

    #[test]
    fn test_contains_file() {
        let tree = sample_tree();
        assert!(tree.contains_file("contracts/token.py"));
        assert!(!tree.contains_file("contracts"));
        assert!(!tree.contains_file("contracts/missing.py"));
        assert!(!tree.contains_file("main.py/extra"));
    }

    #[test]
    fn test_deserialize_listing() {
        let json = r#"[
            {"type": "folder", "name": "src", "children": [{"type": "file", "name": "a.py"}]},
            {"type": "file", "name": "b.py"},
            {"type": "folder", "name": "empty"}
        ]"#;
        let nodes: Vec<FileNode> = serde_json::from_str(json).unwrap();
        assert_eq!(
            nodes,
            vec![
                FileNode::folder("src", vec![FileNode::file("a.py")]),
                FileNode::file("b.py"),
                FileNode::folder("empty", vec![]),
            ]
        );
    }

    #[test]
    fn test_is_executable_path() {
        assert!(is_executable_path("main.py"));
        assert!(is_executable_path("contracts/token.py"));
        assert!(!is_executable_path("readme.txt"));
        assert!(!is_executable_path(""));
    }
}
