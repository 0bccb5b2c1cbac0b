//! C++ header/definition emitter.
//!
//! Produces a header declaring the `Item` record and the `items()` accessor,
//! and a definition file holding one `static const float` array per channel
//! and preview plus the `kItems` table. Element counts are written as
//! `sizeof(array) / sizeof(float)` so they always match the array contents.
//! Output is deterministic: it depends only on the items and options.

use std::fmt::{self, Display, Formatter};

use crate::config::{BakeConfig, Layout};
use crate::types::IrItem;

use super::literal::{escape_c_string, float_literal, VALUES_PER_LINE};

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "dsp::room_ir";

/// Include path of the header as written in the definition file.
pub const DEFAULT_HEADER_INCLUDE: &str = "room_ir/RoomIrData.h";

/// Settings that shape the emitted code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// C++ namespace wrapping all declarations.
    pub namespace: String,
    /// Path used in the definition file's `#include`.
    pub header_include: String,
    /// Record layout.
    pub layout: Layout,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            header_include: DEFAULT_HEADER_INCLUDE.to_string(),
            layout: Layout::default(),
        }
    }
}

impl From<&BakeConfig> for EmitOptions {
    fn from(config: &BakeConfig) -> Self {
        Self {
            namespace: config.namespace.clone(),
            header_include: config.header_include.clone(),
            layout: config.layout,
        }
    }
}

/// Generated header and definition file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSources {
    /// Header text (`RoomIrData.h`).
    pub header: String,
    /// Definition text (`RoomIrData.cpp`).
    pub source: String,
}

/// Emits the header/definition pair for `items`, in the given order.
pub fn emit(items: &[IrItem], options: &EmitOptions) -> GeneratedSources {
    GeneratedSources {
        header: HeaderFile { options }.to_string(),
        source: SourceFile { items, options }.to_string(),
    }
}

/// A `static const float NAME[] = { ... };` definition.
pub struct FloatArray<'a> {
    /// Array symbol.
    pub name: &'a str,
    /// Elements; must not be empty.
    pub values: &'a [f32],
}

impl Display for FloatArray<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "static const float {}[] = {{", self.name)?;
        let lines = self.values.chunks(VALUES_PER_LINE).count();
        for (n, line) in self.values.chunks(VALUES_PER_LINE).enumerate() {
            let literals: Vec<String> = line.iter().map(|v| float_literal(*v)).collect();
            let sep = if n + 1 < lines { "," } else { "" };
            writeln!(f, "    {}{}", literals.join(", "), sep)?;
        }
        writeln!(f, "}};")
    }
}

struct HeaderFile<'a> {
    options: &'a EmitOptions,
}

impl Display for HeaderFile<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let ns = &self.options.namespace;
        writeln!(f, "// Generated by ir-embed. Do not edit.")?;
        writeln!(f, "#pragma once")?;
        writeln!(f)?;
        writeln!(f, "#include <cstddef>")?;
        writeln!(f)?;
        writeln!(f, "namespace {} {{", ns)?;
        writeln!(f)?;
        writeln!(f, "struct Item {{")?;
        writeln!(f, "    const char* id;")?;
        writeln!(f, "    const char* displayName;")?;
        writeln!(f, "    int sampleRate;")?;
        match self.options.layout {
            Layout::Stereo => {
                writeln!(f, "    int channels;")?;
                writeln!(f, "    const float* samplesL;")?;
                writeln!(f, "    const float* samplesR;")?;
            }
            Layout::Mono => {
                writeln!(f, "    const float* samples;")?;
            }
        }
        writeln!(f, "    std::size_t frameCount;")?;
        writeln!(f, "    const float* preview;")?;
        writeln!(f, "    std::size_t previewCount;")?;
        writeln!(f, "}};")?;
        writeln!(f)?;
        writeln!(f, "const Item* items(std::size_t* outCount);")?;
        writeln!(f)?;
        writeln!(f, "}}  // namespace {}", ns)
    }
}

struct SourceFile<'a> {
    items: &'a [IrItem],
    options: &'a EmitOptions,
}

/// Array symbols for one item.
struct ItemSymbols {
    main: String,
    right: Option<String>,
    preview: Option<String>,
}

impl ItemSymbols {
    fn new(item: &IrItem, layout: Layout) -> Self {
        let base = format!("kIr_{}", item.symbol());
        let (main, right) = match layout {
            Layout::Stereo => (
                format!("{}_samplesL", base),
                item.right.as_ref().map(|_| format!("{}_samplesR", base)),
            ),
            Layout::Mono => (format!("{}_samples", base), None),
        };
        let preview = (!item.preview.is_empty()).then(|| format!("{}_preview", base));
        Self { main, right, preview }
    }
}

impl Display for SourceFile<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let ns = &self.options.namespace;
        let layout = self.options.layout;
        writeln!(f, "// Generated by ir-embed. Do not edit.")?;
        writeln!(f, "#include \"{}\"", escape_c_string(&self.options.header_include))?;
        writeln!(f)?;
        writeln!(f, "namespace {} {{", ns)?;
        writeln!(f)?;

        let symbols: Vec<ItemSymbols> = self
            .items
            .iter()
            .map(|item| ItemSymbols::new(item, layout))
            .collect();

        for (item, sym) in self.items.iter().zip(&symbols) {
            write!(f, "{}", FloatArray { name: &sym.main, values: &item.left })?;
            writeln!(f)?;
            if let (Some(name), Some(values)) = (&sym.right, &item.right) {
                write!(f, "{}", FloatArray { name, values })?;
                writeln!(f)?;
            }
            if let Some(name) = &sym.preview {
                write!(f, "{}", FloatArray { name, values: &item.preview })?;
                writeln!(f)?;
            }
        }

        if self.items.is_empty() {
            writeln!(f, "const Item* items(std::size_t* outCount) {{")?;
            writeln!(f, "    if (outCount) {{")?;
            writeln!(f, "        *outCount = 0;")?;
            writeln!(f, "    }}")?;
            writeln!(f, "    return nullptr;")?;
            writeln!(f, "}}")?;
            writeln!(f)?;
            return writeln!(f, "}}  // namespace {}", ns);
        }

        writeln!(f, "static const Item kItems[] = {{")?;
        for (item, sym) in self.items.iter().zip(&symbols) {
            writeln!(f, "    {{")?;
            writeln!(f, "        \"{}\",", escape_c_string(&item.id))?;
            writeln!(f, "        \"{}\",", escape_c_string(&item.display_name))?;
            writeln!(f, "        {},", item.sample_rate)?;
            if layout == Layout::Stereo {
                writeln!(f, "        {},", item.channels)?;
            }
            writeln!(f, "        {},", sym.main)?;
            if layout == Layout::Stereo {
                writeln!(f, "        {},", sym.right.as_deref().unwrap_or("nullptr"))?;
            }
            writeln!(f, "        sizeof({}) / sizeof(float),", sym.main)?;
            match &sym.preview {
                Some(name) => {
                    writeln!(f, "        {},", name)?;
                    writeln!(f, "        sizeof({}) / sizeof(float),", name)?;
                }
                None => {
                    writeln!(f, "        nullptr,")?;
                    writeln!(f, "        0,")?;
                }
            }
            writeln!(f, "    }},")?;
        }
        writeln!(f, "}};")?;
        writeln!(f)?;
        writeln!(f, "const Item* items(std::size_t* outCount) {{")?;
        writeln!(f, "    if (outCount) {{")?;
        writeln!(f, "        *outCount = sizeof(kItems) / sizeof(Item);")?;
        writeln!(f, "    }}")?;
        writeln!(f, "    return kItems;")?;
        writeln!(f, "}}")?;
        writeln!(f)?;
        writeln!(f, "}}  // namespace {}", ns)
    }
}
