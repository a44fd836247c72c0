/// One row of the content query: a node revision joined with its body,
/// author and menu link.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentRecord {
    pub title: String,
    pub body: Option<String>,
    pub summary: Option<String>,
    /// Creation time as epoch seconds, exactly as stored
    pub created: i64,
    pub published: bool,
    pub author: Option<String>,
    pub nid: i64,
    /// Display title of the node's menu link (may differ from `title`)
    pub menu_title: Option<String>,
    pub mlid: i64,
    pub plid: i64,
}
