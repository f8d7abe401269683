//! ファイル集合と位置情報
//!
//! すべてのソースファイルを一つのグローバルな位置空間に配置する。
//! 各ファイルは `base` から始まる連続した範囲を持ち、構文木のノードが
//! 保持する位置からどのファイルのどの行に属するかを逆引きできる。

use std::fmt;

/// ファイルの識別子（登録順の添字）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub usize);

/// 行・列による位置（どちらも1始まり）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone)]
struct FileEntry {
    name: String,
    base: usize,
    size: usize,
    line_starts: Vec<usize>,
}

/// 位置からファイルを逆引きするための索引
#[derive(Debug, Clone)]
pub struct FileSet {
    files: Vec<FileEntry>,
    next_base: usize,
}

impl Default for FileSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSet {
    /// 位置0は無効な位置として予約する
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            next_base: 1,
        }
    }

    /// ファイルを登録し、その識別子と基準位置を返す
    pub fn add_file(&mut self, name: impl Into<String>, source: &str) -> (FileId, usize) {
        let base = self.next_base;
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();

        let id = FileId(self.files.len());
        self.files.push(FileEntry {
            name: name.into(),
            base,
            size: source.len(),
            line_starts,
        });
        // 末尾位置（EOF）も含めるため +1 する
        self.next_base = base + source.len() + 1;

        (id, base)
    }

    /// 位置を含むファイルを探す
    pub fn file_at(&self, pos: usize) -> Option<FileId> {
        let idx = self.files.partition_point(|f| f.base <= pos);
        let entry = self.files.get(idx.checked_sub(1)?)?;
        (pos <= entry.base + entry.size).then_some(FileId(idx - 1))
    }

    /// 位置を行・列に変換する
    pub fn position(&self, pos: usize) -> Option<Position> {
        let FileId(idx) = self.file_at(pos)?;
        let entry = &self.files[idx];
        let offset = pos - entry.base;
        let line = entry.line_starts.partition_point(|&start| start <= offset);
        let column = offset - entry.line_starts[line - 1] + 1;

        Some(Position {
            file: entry.name.clone(),
            line,
            column,
        })
    }

    /// ファイルの論理名
    pub fn file_name(&self, id: FileId) -> Option<&str> {
        self.files.get(id.0).map(|f| f.name.as_str())
    }

    /// ファイルの基準位置
    pub fn base(&self, id: FileId) -> Option<usize> {
        self.files.get(id.0).map(|f| f.base)
    }

    /// 登録されたファイル数
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
