//! Output sinks for extracted records

use super::types::{node_csv, parameter_csv, ExtendedParameter, Inventory, RecordKind};
use crate::{
    actions::{Node, Parameter},
    error::{ExtractError, Result},
};
use std::{io::Write, str::FromStr};

/// Serialization shape of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `parent,namespace,name,type,value` / `package,name,type`
    Csv,
    /// 14-column parameter schema
    Extended,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "csv" => Ok(OutputFormat::Csv),
            "extended" => Ok(OutputFormat::Extended),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Extended => "extended",
            OutputFormat::Json => "json",
        }
    }

    /// Fails when this format has no representation for some of `kind`.
    ///
    /// The extended schema only describes parameters.
    pub fn check(self, kind: RecordKind) -> Result<()> {
        if self == OutputFormat::Extended && kind.includes_nodes() {
            return Err(ExtractError::UnsupportedFormat {
                format: self.name(),
                kind: kind.name(),
            });
        }
        Ok(())
    }

    /// Writer for this format over `out`
    pub fn writer<'w, W: Write + 'w>(
        self,
        out: W,
        kind: RecordKind,
    ) -> Result<Box<dyn RecordWriter + 'w>> {
        self.check(kind)?;
        Ok(match self {
            OutputFormat::Csv => Box::new(CsvWriter::new(out)),
            OutputFormat::Extended => Box::new(ExtendedCsvWriter::new(out)),
            OutputFormat::Json => Box::new(JsonWriter::new(out, kind)),
        })
    }
}

/// Consumer of extracted records
pub trait RecordWriter {
    fn write_parameter(&mut self, param: &Parameter) -> Result<()>;

    fn write_node(&mut self, node: &Node) -> Result<()>;

    /// Flush anything buffered
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Feed the parts of `inventory` selected by `kind` to `writer`
pub fn write_inventory(
    writer: &mut dyn RecordWriter,
    inventory: &Inventory,
    kind: RecordKind,
) -> Result<()> {
    if kind.includes_parameters() {
        for param in &inventory.parameters {
            writer.write_parameter(param)?;
        }
    }
    if kind.includes_nodes() {
        for node in &inventory.nodes {
            writer.write_node(node)?;
        }
    }
    writer.finish()
}

/// One unquoted comma-separated line per record
pub struct CsvWriter<W> {
    out: W,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordWriter for CsvWriter<W> {
    fn write_parameter(&mut self, param: &Parameter) -> Result<()> {
        writeln!(self.out, "{}", parameter_csv(param))?;
        Ok(())
    }

    fn write_node(&mut self, node: &Node) -> Result<()> {
        writeln!(self.out, "{}", node_csv(node))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Extended parameter schema; nodes have no extended form and are skipped
pub struct ExtendedCsvWriter<W> {
    out: W,
}

impl<W: Write> ExtendedCsvWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordWriter for ExtendedCsvWriter<W> {
    fn write_parameter(&mut self, param: &Parameter) -> Result<()> {
        writeln!(self.out, "{}", ExtendedParameter(param.clone()))?;
        Ok(())
    }

    fn write_node(&mut self, _node: &Node) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Buffers records and writes one pretty-printed JSON document on finish.
///
/// `Parameters` and `Nodes` produce a JSON array; `All` produces an
/// [`Inventory`] object.
pub struct JsonWriter<W> {
    out: W,
    kind: RecordKind,
    inventory: Inventory,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W, kind: RecordKind) -> Self {
        Self {
            out,
            kind,
            inventory: Inventory::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordWriter for JsonWriter<W> {
    fn write_parameter(&mut self, param: &Parameter) -> Result<()> {
        self.inventory.parameters.push(param.clone());
        Ok(())
    }

    fn write_node(&mut self, node: &Node) -> Result<()> {
        self.inventory.nodes.push(node.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let inventory = std::mem::take(&mut self.inventory);
        match self.kind {
            RecordKind::Parameters => {
                serde_json::to_writer_pretty(&mut self.out, &inventory.parameters)?
            }
            RecordKind::Nodes => serde_json::to_writer_pretty(&mut self.out, &inventory.nodes)?,
            RecordKind::All => serde_json::to_writer_pretty(&mut self.out, &inventory)?,
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
