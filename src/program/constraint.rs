//! ビルド制約の評価
//!
//! ファイル名の `_GOOS` / `_GOARCH` / `_GOOS_GOARCH` 接尾辞と、パッケージ節より前の
//! `//go:build` 行（なければ `// +build` 行）で、そのファイルを対象プラットフォームで
//! ビルドするかを決める。

use std::env;

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// ビルド対象のプラットフォーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub goos: String,
    pub goarch: String,
    pub cgo_enabled: bool,
}

impl Default for BuildContext {
    /// 環境変数 `GOOS`・`GOARCH`・`CGO_ENABLED`、なければ実行中のホスト
    fn default() -> Self {
        let goos = env::var("GOOS")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| host_os().to_string());
        let goarch = env::var("GOARCH")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| host_arch().to_string());
        let cgo_enabled = match env::var("CGO_ENABLED") {
            Ok(v) => v == "1",
            Err(_) => goos != "js" && goos != "wasip1",
        };
        Self {
            goos,
            goarch,
            cgo_enabled,
        }
    }
}

impl BuildContext {
    pub fn new(goos: &str, goarch: &str) -> Self {
        Self {
            goos: goos.to_string(),
            goarch: goarch.to_string(),
            cgo_enabled: true,
        }
    }

    pub fn with_cgo(mut self, enabled: bool) -> Self {
        self.cgo_enabled = enabled;
        self
    }

    /// ファイル名と先頭のビルド制約の両方を満たすか
    pub fn should_build(&self, file_name: &str, source: &str) -> bool {
        self.matches_file_name(file_name) && self.matches_header(source)
    }

    /// `name_linux.go` や `name_windows_amd64.go` のような接尾辞を評価する
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let stem = file_name.strip_suffix(".go").unwrap_or(file_name);
        let stem = stem.strip_suffix("_test").unwrap_or(stem);

        // 最初の `_` より前は名前の一部
        let Some(idx) = stem.find('_') else {
            return true;
        };
        let parts: Vec<&str> = stem[idx..].split('_').collect();
        let n = parts.len();

        if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.matches_tag(parts[n - 2]) && self.matches_tag(parts[n - 1]);
        }
        if KNOWN_OS.contains(&parts[n - 1]) || KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.matches_tag(parts[n - 1]);
        }
        true
    }

    /// パッケージ節より前の `//go:build` / `// +build` を評価する
    ///
    /// `//go:build` があればそれだけを使う。解釈できない式のファイルはビルドしない。
    pub fn matches_header(&self, source: &str) -> bool {
        let mut plus_lines = Vec::new();

        for line in header_comment_lines(source) {
            if let Some(expr) = line.strip_prefix("//go:build") {
                if !expr.is_empty() && !expr.starts_with(char::is_whitespace) {
                    continue;
                }
                return match parse_expr(expr) {
                    Some(expr) => expr.eval(&|tag| self.matches_tag(tag)),
                    None => false,
                };
            }
            if let Some(rest) = line.strip_prefix("//") {
                if let Some(options) = rest.trim_start().strip_prefix("+build") {
                    if options.is_empty() || options.starts_with(char::is_whitespace) {
                        plus_lines.push(options);
                    }
                }
            }
        }

        plus_lines
            .iter()
            .all(|options| self.matches_plus_build(options))
    }

    /// `// +build` の1行。空白区切りは OR、カンマ区切りは AND
    fn matches_plus_build(&self, options: &str) -> bool {
        options.split_whitespace().any(|option| {
            option.split(',').all(|term| match term.strip_prefix('!') {
                Some(tag) => !tag.is_empty() && !self.matches_tag(tag),
                None => self.matches_tag(term),
            })
        })
    }

    /// 1つのタグが満たされるか
    pub fn matches_tag(&self, tag: &str) -> bool {
        if tag == self.goos || tag == self.goarch {
            return true;
        }
        match tag {
            "linux" => self.goos == "android",
            "solaris" => self.goos == "illumos",
            "darwin" => self.goos == "ios",
            "unix" => UNIX_OS.contains(&self.goos.as_str()),
            "cgo" => self.cgo_enabled,
            "gc" => true,
            _ => is_release_tag(tag),
        }
    }
}

/// `go1.N` はすべて満たされるものとする
fn is_release_tag(tag: &str) -> bool {
    tag.strip_prefix("go1.")
        .is_some_and(|minor| !minor.is_empty() && minor.bytes().all(|b| b.is_ascii_digit()))
}

fn host_os() -> &'static str {
    match env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}

fn host_arch() -> &'static str {
    match env::consts::ARCH {
        "x86" => "386",
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "powerpc" => "ppc",
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        "mips" if cfg!(target_endian = "little") => "mipsle",
        "mips64" if cfg!(target_endian = "little") => "mips64le",
        "wasm32" => "wasm",
        arch => arch,
    }
}

/// パッケージ節より前にある行コメント（空行は読み飛ばす）
fn header_comment_lines(source: &str) -> impl Iterator<Item = &str> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    source
        .lines()
        .map(str::trim)
        .take_while(|line| line.is_empty() || line.starts_with("//"))
        .filter(|line| !line.is_empty())
}

/// `//go:build` の式
#[derive(Debug, Clone, PartialEq, Eq)]
enum BuildExpr {
    Tag(String),
    Not(Box<BuildExpr>),
    And(Box<BuildExpr>, Box<BuildExpr>),
    Or(Box<BuildExpr>, Box<BuildExpr>),
}

impl BuildExpr {
    fn eval(&self, matches: &dyn Fn(&str) -> bool) -> bool {
        match self {
            BuildExpr::Tag(tag) => matches(tag),
            BuildExpr::Not(x) => !x.eval(matches),
            BuildExpr::And(x, y) => x.eval(matches) && y.eval(matches),
            BuildExpr::Or(x, y) => x.eval(matches) || y.eval(matches),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ExprToken<'a> {
    Tag(&'a str),
    Not,
    AndAnd,
    OrOr,
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> Option<Vec<ExprToken<'_>>> {
    let mut tokens = Vec::new();
    let mut rest = expr.trim_start();

    while let Some(c) = rest.chars().next() {
        let (token, len) = match c {
            '!' => (ExprToken::Not, 1),
            '(' => (ExprToken::LParen, 1),
            ')' => (ExprToken::RParen, 1),
            '&' if rest.starts_with("&&") => (ExprToken::AndAnd, 2),
            '|' if rest.starts_with("||") => (ExprToken::OrOr, 2),
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let len = rest
                    .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
                    .unwrap_or(rest.len());
                (ExprToken::Tag(&rest[..len]), len)
            }
            _ => return None,
        };
        tokens.push(token);
        rest = rest[len..].trim_start();
    }
    Some(tokens)
}

/// `||` が最も弱く、次に `&&`、`!` が最も強い
fn parse_expr(expr: &str) -> Option<BuildExpr> {
    let tokens = tokenize(expr)?;
    let mut parser = ExprParser { tokens, pos: 0 };
    let expr = parser.or()?;
    (parser.pos == parser.tokens.len()).then_some(expr)
}

struct ExprParser<'a> {
    tokens: Vec<ExprToken<'a>>,
    pos: usize,
}

impl ExprParser<'_> {
    fn eat(&mut self, token: &ExprToken<'_>) -> bool {
        if self.tokens.get(self.pos) == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or(&mut self) -> Option<BuildExpr> {
        let mut left = self.and()?;
        while self.eat(&ExprToken::OrOr) {
            let right = self.and()?;
            left = BuildExpr::Or(Box::new(left), Box::new(right));
        }
        Some(left)
    }

    fn and(&mut self) -> Option<BuildExpr> {
        let mut left = self.not()?;
        while self.eat(&ExprToken::AndAnd) {
            let right = self.not()?;
            left = BuildExpr::And(Box::new(left), Box::new(right));
        }
        Some(left)
    }

    fn not(&mut self) -> Option<BuildExpr> {
        if self.eat(&ExprToken::Not) {
            return Some(BuildExpr::Not(Box::new(self.not()?)));
        }
        self.atom()
    }

    fn atom(&mut self) -> Option<BuildExpr> {
        if self.eat(&ExprToken::LParen) {
            let expr = self.or()?;
            return self.eat(&ExprToken::RParen).then_some(expr);
        }
        match self.tokens.get(self.pos)? {
            ExprToken::Tag(tag) => {
                let tag = tag.to_string();
                self.pos += 1;
                Some(BuildExpr::Tag(tag))
            }
            _ => None,
        }
    }
}
