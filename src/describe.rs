//! 宣言の1行表示とソース断片の取り出し

use std::fmt;

use crate::ast::{Decl, Expr, Spec};
use crate::program::{DeclRef, Program};

impl<'p> DeclRef<'p> {
    /// `func main (main.go:5:1)` のような1行の説明
    pub fn describe(&self) -> String {
        let position = self
            .position()
            .map(|pos| pos.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!("{} ({})", self.summary(), position)
    }

    /// 宣言のソースコードそのもの
    pub fn source_text(&self) -> &'p str {
        self.file().text(self.span()).unwrap_or_default()
    }

    fn summary(&self) -> String {
        match self.decl() {
            Decl::Func(func) => match self.receiver_type_name() {
                Some(recv) => format!("func ({}) {}", recv, func.name.name),
                None => format!("func {}", func.name.name),
            },
            Decl::Gen(gen) => {
                let keyword = self.keyword();
                match gen.specs.first() {
                    Some(Spec::Import(import)) => format!("{} {}", keyword, import.path.value),
                    Some(Spec::Type(ty)) => {
                        format!("{} {} {}", keyword, ty.name.name, type_summary(&ty.ty))
                    }
                    Some(Spec::Value(_)) | None => match self.name() {
                        Some(name) => format!("{} {}", keyword, name),
                        None => keyword.to_string(),
                    },
                }
            }
        }
    }
}

/// 型式の短い表記
fn type_summary(ty: &Expr) -> String {
    match ty {
        Expr::Ident(ident) => ident.name.clone(),
        Expr::Selector(sel) => format!("{}.{}", type_summary(&sel.x), sel.sel.name),
        Expr::Star(star) => format!("*{}", type_summary(&star.x)),
        Expr::Paren(paren) => type_summary(&paren.x),
        Expr::Index(index) => format!("{}[...]", type_summary(&index.x)),
        Expr::ArrayType(array) => match array.len {
            Some(_) => format!("[...]{}", type_summary(&array.elem)),
            None => format!("[]{}", type_summary(&array.elem)),
        },
        Expr::MapType(map) => format!(
            "map[{}]{}",
            type_summary(&map.key),
            type_summary(&map.value)
        ),
        Expr::ChanType(chan) => format!("chan {}", type_summary(&chan.value)),
        Expr::FuncType(_) => "func".to_string(),
        Expr::StructType(_) => "struct".to_string(),
        Expr::InterfaceType(_) => "interface".to_string(),
        _ => "?".to_string(),
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program {{")?;
        writeln!(f, "  packages: {{")?;
        for package in self.packages() {
            writeln!(f, "    '{}': Package {{", package.key())?;
            writeln!(f, "      name: '{}',", package.name())?;
            writeln!(f, "      dir: '{}',", package.dir().display())?;
            writeln!(f, "      files: {{")?;
            for file in package.files() {
                writeln!(f, "        '{}': '{}',", file.name(), file.package_name())?;
            }
            writeln!(f, "      }}")?;
            writeln!(f, "    }},")?;
        }
        writeln!(f, "  }}")?;
        writeln!(f, "  decls: [")?;
        for decl in self.decls() {
            writeln!(f, "    {}", decl.describe())?;
        }
        writeln!(f, "  ]")?;
        write!(f, "}}")
    }
}
