//! Code block languages supported by Notion
//!
//! Fenced code blocks carry free-form info strings (`ts`, `py`, `c++`,
//! `Dockerfile`...). Notion only accepts a fixed set of language names, so
//! tags are resolved against that set first and an alias table second.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};

macro_rules! code_languages {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A language name accepted by Notion code blocks
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum CodeLanguage {
            $($variant,)+
            #[default]
            PlainText,
        }

        impl CodeLanguage {
            /// All supported languages, in Notion's order
            pub const ALL: &'static [CodeLanguage] = &[$(CodeLanguage::$variant,)+ CodeLanguage::PlainText];

            /// The name Notion uses for this language
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(CodeLanguage::$variant => $name,)+
                    CodeLanguage::PlainText => "plain text",
                }
            }
        }
    };
}

code_languages! {
    Abap => "abap",
    Arduino => "arduino",
    Bash => "bash",
    Basic => "basic",
    C => "c",
    Clojure => "clojure",
    CoffeeScript => "coffeescript",
    Cpp => "c++",
    CSharp => "c#",
    Css => "css",
    Dart => "dart",
    Diff => "diff",
    Docker => "docker",
    Elixir => "elixir",
    Elm => "elm",
    Erlang => "erlang",
    Flow => "flow",
    Fortran => "fortran",
    FSharp => "f#",
    Gherkin => "gherkin",
    Glsl => "glsl",
    Go => "go",
    GraphQl => "graphql",
    Groovy => "groovy",
    Haskell => "haskell",
    Html => "html",
    Java => "java",
    JavaScript => "javascript",
    Json => "json",
    Julia => "julia",
    Kotlin => "kotlin",
    Latex => "latex",
    Less => "less",
    Lisp => "lisp",
    LiveScript => "livescript",
    Lua => "lua",
    Makefile => "makefile",
    Markdown => "markdown",
    Markup => "markup",
    Matlab => "matlab",
    Mermaid => "mermaid",
    Nix => "nix",
    ObjectiveC => "objective-c",
    OCaml => "ocaml",
    Pascal => "pascal",
    Perl => "perl",
    Php => "php",
    PowerShell => "powershell",
    Prolog => "prolog",
    Protobuf => "protobuf",
    Python => "python",
    R => "r",
    Reason => "reason",
    Ruby => "ruby",
    Rust => "rust",
    Sass => "sass",
    Scala => "scala",
    Scheme => "scheme",
    Scss => "scss",
    Shell => "shell",
    Sql => "sql",
    Swift => "swift",
    TypeScript => "typescript",
    VbNet => "vb.net",
    Verilog => "verilog",
    Vhdl => "vhdl",
    VisualBasic => "visual basic",
    WebAssembly => "webassembly",
    Xml => "xml",
    Yaml => "yaml",
    JavaCFamily => "java/c/c++/c#",
}

/// Common highlighter aliases that are not Notion names themselves
const ALIASES: &[(&str, CodeLanguage)] = &[
    ("sh", CodeLanguage::Shell),
    ("zsh", CodeLanguage::Shell),
    ("ksh", CodeLanguage::Shell),
    ("shell-script", CodeLanguage::Shell),
    ("clj", CodeLanguage::Clojure),
    ("cljs", CodeLanguage::Clojure),
    ("coffee", CodeLanguage::CoffeeScript),
    ("coffee-script", CodeLanguage::CoffeeScript),
    ("cpp", CodeLanguage::Cpp),
    ("cc", CodeLanguage::Cpp),
    ("cxx", CodeLanguage::Cpp),
    ("hpp", CodeLanguage::Cpp),
    ("c_cpp", CodeLanguage::Cpp),
    ("ino", CodeLanguage::Arduino),
    ("csharp", CodeLanguage::CSharp),
    ("cs", CodeLanguage::CSharp),
    ("patch", CodeLanguage::Diff),
    ("udiff", CodeLanguage::Diff),
    ("dockerfile", CodeLanguage::Docker),
    ("containerfile", CodeLanguage::Docker),
    ("ex", CodeLanguage::Elixir),
    ("exs", CodeLanguage::Elixir),
    ("erl", CodeLanguage::Erlang),
    ("f90", CodeLanguage::Fortran),
    ("fsharp", CodeLanguage::FSharp),
    ("fs", CodeLanguage::FSharp),
    ("cucumber", CodeLanguage::Gherkin),
    ("feature", CodeLanguage::Gherkin),
    ("golang", CodeLanguage::Go),
    ("gql", CodeLanguage::GraphQl),
    ("gradle", CodeLanguage::Groovy),
    ("hs", CodeLanguage::Haskell),
    ("xhtml", CodeLanguage::Html),
    ("htm", CodeLanguage::Html),
    ("js", CodeLanguage::JavaScript),
    ("jsx", CodeLanguage::JavaScript),
    ("mjs", CodeLanguage::JavaScript),
    ("cjs", CodeLanguage::JavaScript),
    ("node", CodeLanguage::JavaScript),
    ("geojson", CodeLanguage::Json),
    ("jsonl", CodeLanguage::Json),
    ("json5", CodeLanguage::Json),
    ("jl", CodeLanguage::Julia),
    ("kt", CodeLanguage::Kotlin),
    ("kts", CodeLanguage::Kotlin),
    ("tex", CodeLanguage::Latex),
    ("common-lisp", CodeLanguage::Lisp),
    ("cl", CodeLanguage::Lisp),
    ("elisp", CodeLanguage::Lisp),
    ("emacs-lisp", CodeLanguage::Lisp),
    ("ls", CodeLanguage::LiveScript),
    ("live-script", CodeLanguage::LiveScript),
    ("make", CodeLanguage::Makefile),
    ("mf", CodeLanguage::Makefile),
    ("bsdmake", CodeLanguage::Makefile),
    ("md", CodeLanguage::Markdown),
    ("pandoc", CodeLanguage::Markdown),
    ("octave", CodeLanguage::Matlab),
    ("nixos", CodeLanguage::Nix),
    ("objc", CodeLanguage::ObjectiveC),
    ("objectivec", CodeLanguage::ObjectiveC),
    ("obj-c", CodeLanguage::ObjectiveC),
    ("ml", CodeLanguage::OCaml),
    ("delphi", CodeLanguage::Pascal),
    ("objectpascal", CodeLanguage::Pascal),
    ("pl", CodeLanguage::Perl),
    ("cperl", CodeLanguage::Perl),
    ("inc", CodeLanguage::Php),
    ("posh", CodeLanguage::PowerShell),
    ("pwsh", CodeLanguage::PowerShell),
    ("ps1", CodeLanguage::PowerShell),
    ("proto", CodeLanguage::Protobuf),
    ("protocol buffer", CodeLanguage::Protobuf),
    ("py", CodeLanguage::Python),
    ("py3", CodeLanguage::Python),
    ("python3", CodeLanguage::Python),
    ("rscript", CodeLanguage::R),
    ("splus", CodeLanguage::R),
    ("re", CodeLanguage::Reason),
    ("rb", CodeLanguage::Ruby),
    ("jruby", CodeLanguage::Ruby),
    ("rake", CodeLanguage::Ruby),
    ("rs", CodeLanguage::Rust),
    ("psql", CodeLanguage::Sql),
    ("ts", CodeLanguage::TypeScript),
    ("tsx", CodeLanguage::TypeScript),
    ("vbnet", CodeLanguage::VbNet),
    ("vb .net", CodeLanguage::VbNet),
    ("visual basic .net", CodeLanguage::VbNet),
    ("vb", CodeLanguage::VisualBasic),
    ("wasm", CodeLanguage::WebAssembly),
    ("wast", CodeLanguage::WebAssembly),
    ("rss", CodeLanguage::Xml),
    ("xsd", CodeLanguage::Xml),
    ("wsdl", CodeLanguage::Xml),
    ("yml", CodeLanguage::Yaml),
];

static LOOKUP: Lazy<HashMap<&'static str, CodeLanguage>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, CodeLanguage> =
        CodeLanguage::ALL.iter().map(|lang| (lang.as_str(), *lang)).collect();
    for (alias, lang) in ALIASES {
        map.entry(*alias).or_insert(*lang);
    }
    map
});

impl CodeLanguage {
    /// Resolve a fenced code block's info tag.
    ///
    /// The tag is lower-cased, matched against the canonical names, then
    /// against the alias table. Missing or unknown tags become `PlainText`.
    pub fn resolve(tag: Option<&str>) -> CodeLanguage {
        let Some(tag) = tag.map(str::trim).filter(|t| !t.is_empty()) else {
            return CodeLanguage::PlainText;
        };
        LOOKUP
            .get(tag.to_lowercase().as_str())
            .copied()
            .unwrap_or_default()
    }
}

impl Serialize for CodeLanguage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("java"), CodeLanguage::Java)]
    #[case(Some("JavaScript"), CodeLanguage::JavaScript)]
    #[case(Some("ts"), CodeLanguage::TypeScript)]
    #[case(Some("py"), CodeLanguage::Python)]
    #[case(Some("sh"), CodeLanguage::Shell)]
    #[case(Some("bash"), CodeLanguage::Bash)]
    #[case(Some("c++"), CodeLanguage::Cpp)]
    #[case(Some("Dockerfile"), CodeLanguage::Docker)]
    #[case(Some("plain text"), CodeLanguage::PlainText)]
    #[case(Some("not-supported"), CodeLanguage::PlainText)]
    #[case(Some(""), CodeLanguage::PlainText)]
    #[case(None, CodeLanguage::PlainText)]
    fn test_resolve(#[case] tag: Option<&str>, #[case] expected: CodeLanguage) {
        assert_eq!(CodeLanguage::resolve(tag), expected);
    }

    #[test]
    fn test_aliases_never_shadow_canonical_names() {
        for (alias, _) in ALIASES {
            assert!(
                CodeLanguage::ALL.iter().all(|lang| lang.as_str() != *alias),
                "alias {alias} duplicates a canonical name"
            );
        }
    }

    #[test]
    fn test_serializes_as_notion_name() {
        let value = serde_json::to_value(CodeLanguage::VbNet).unwrap();
        assert_eq!(value, serde_json::json!("vb.net"));
    }
}
