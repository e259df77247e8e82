//! Pretty-printing of `<path>` elements for terminals.

use minijinja::{Environment, context};

use crate::command::Command;
use crate::error::Result;
use crate::path::parse_path;
use crate::transform_list::parse_transform_list;

/// Narrowest layout `format_path_view` is asked to fit.
pub const MIN_COLUMNS: usize = 60;

const PATH_VIEW_TEMPLATE: &str = concat!(
    "{% if line_number %}@ {{ line_number }}\n{% endif %}",
    "<path\n",
    "{% if attrs %}    {{ attrs }}\n{% endif %}",
    "{% if transform %}    transform=\"{{ transform }}\"\n{% endif %}",
    "    d=\"{{ d }}\"/>",
);

/// Column where the value of `transform="` starts.
const TRANSFORM_PADDING: usize = 15;
/// Column where the value of `d="` starts.
const D_PADDING: usize = 7;
const ATTRS_PADDING: usize = 4;

/// A `<path>` element as found in a document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathView {
    /// 1-based line of the element's start tag
    pub line: Option<usize>,
    pub d: String,
    pub transform: Option<String>,
    /// Every other attribute, in document order, unescaped
    pub attrs: Vec<(String, String)>,
}

/// A block of text whose lines wrap at `max_column` and continue indented
/// by `padding`.
#[derive(Debug, Clone)]
pub struct IndentedBox {
    padding: usize,
    max_column: usize,
    column: usize,
    text: String,
}

impl IndentedBox {
    pub fn new(padding: usize, max_column: usize) -> Self {
        Self {
            padding,
            max_column,
            column: padding,
            text: " ".repeat(padding),
        }
    }

    fn indent(&self) -> String {
        " ".repeat(self.padding)
    }

    fn at_line_start(&self) -> bool {
        let indent = self.indent();
        self.text == indent || self.text.ends_with(&format!("\n{}", indent))
    }

    /// Append `words`, starting a new line first if they would pass
    /// `max_column`. Leading whitespace is dropped at the start of a line; a
    /// trailing newline ends the line.
    pub fn append_words(&mut self, words: &str) {
        let (mut words, newline) = match words.strip_suffix('\n') {
            Some(w) => (w.strip_suffix('\r').unwrap_or(w), true),
            None => (words, false),
        };
        if self.at_line_start() {
            words = words.trim_start();
        }

        // The column after a wrap counts the dropped leading whitespace too.
        let len = words.chars().count();
        if self.column + len > self.max_column {
            self.text.push('\n');
            self.text.push_str(&self.indent());
            self.text.push_str(words.trim_start());
            self.column = self.padding + len;
        } else {
            self.text.push_str(words);
            self.column += len;
        }

        if newline {
            self.feed_line();
        }
    }

    /// End the current line.
    pub fn feed_line(&mut self) {
        let kept = self.text.trim_end_matches([' ', '\t']).len();
        self.text.truncate(kept);
        self.text.push('\n');
        self.text.push_str(&self.indent());
        self.column = self.padding;
    }

    /// Splice the text of `other` in at the current position.
    pub fn append_box(&mut self, other: &IndentedBox) {
        self.text.push_str(other.leading_stripped());
    }

    pub fn text(&self) -> &str {
        self.text.trim_end()
    }

    pub fn leading_stripped(&self) -> &str {
        self.text().trim_start()
    }
}

/// The rendered letter of `cmd` and its data words, one per group.
pub fn command_words(cmd: &Command, precision: u8) -> (char, Vec<String>) {
    (cmd.display_letter(), cmd.words(precision))
}

/// Lay out path data one command per line, wrapping long commands with their
/// data aligned after the letter.
pub fn boxed_path_data<'a>(
    commands: impl IntoIterator<Item = &'a Command>,
    padding: usize,
    max_column: usize,
    precision: u8,
) -> IndentedBox {
    let mut bx = IndentedBox::new(padding, max_column);
    for cmd in commands {
        let (letter, words) = command_words(cmd, precision);
        bx.append_words(&format!("{} ", letter));
        let mut data = IndentedBox::new(padding + 2, max_column);
        for word in words {
            data.append_words(&format!("    {}", word));
        }
        bx.append_box(&data);
        bx.feed_line();
    }
    bx
}

/// Render one `<path>` element: an optional `@ line` header, the other
/// attributes, one transform function per line and one command per line.
pub fn format_path_view(view: &PathView, columns: usize, precision: u8) -> Result<String> {
    let max_column = columns.max(MIN_COLUMNS);

    let pd = parse_path(&view.d)?;
    let d = boxed_path_data(&pd, D_PADDING, max_column, precision);

    let transform = match &view.transform {
        Some(src) => {
            let mut bx = IndentedBox::new(TRANSFORM_PADDING, max_column);
            for t in parse_transform_list(src)? {
                bx.append_words(&t.render(precision));
                bx.feed_line();
            }
            Some(bx.leading_stripped().to_string())
        }
        None => None,
    };

    let attrs = if view.attrs.is_empty() {
        None
    } else {
        let mut bx = IndentedBox::new(ATTRS_PADDING, max_column);
        for (key, value) in &view.attrs {
            bx.append_words(&format!(" {}=\"{}\"", key, quick_xml::escape::escape(value)));
        }
        Some(bx.leading_stripped().to_string())
    };

    let mut env = Environment::new();
    env.add_template("path_view", PATH_VIEW_TEMPLATE)?;
    let tmpl = env.get_template("path_view")?;
    let rendered = tmpl.render(context! {
        line_number => view.line,
        attrs => attrs,
        transform => transform,
        d => d.leading_stripped(),
    })?;
    Ok(rendered)
}
