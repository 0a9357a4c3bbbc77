//! Drives scanning and emission over the whole registry.

use crate::config::GeneratorConfig;
use crate::emitter::{emit_constant_class, emit_declarations, emit_dispatcher, emit_preamble};
use crate::error::{ConstgenError, Result};
use crate::registry::{CONSTANT_CLASSES, ConstantClass};
use crate::scanner::HeaderScanner;
use std::io::{Read, Write};
use tracing::{debug, info, warn};

/// Per-class counts collected while generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassReport {
    pub name: &'static str,
    /// Constants supplied by the registry.
    pub seeded: usize,
    /// Constants found in the header.
    pub scanned: usize,
}

/// Report of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub classes: Vec<ClassReport>,
}

impl GenerationReport {
    pub fn total_constants(&self) -> usize {
        self.classes.iter().map(|c| c.seeded + c.scanned).sum()
    }

    /// Classes for which the header contributed nothing.
    pub fn empty_classes(&self) -> impl Iterator<Item = &ClassReport> {
        self.classes.iter().filter(|c| c.scanned == 0)
    }
}

/// Generates the C source for the compiled-in registry.
pub fn generate(header: &str, config: &GeneratorConfig) -> Result<String> {
    generate_with_report(header, config).map(|(source, _)| source)
}

/// Generates the C source for the compiled-in registry and reports what
/// each class picked up.
pub fn generate_with_report(
    header: &str,
    config: &GeneratorConfig,
) -> Result<(String, GenerationReport)> {
    generate_classes(header, CONSTANT_CLASSES, config)
}

/// Generates the C source for an arbitrary ordered set of classes.
///
/// In strict mode the first class without a header match aborts the run;
/// otherwise it is logged and emitted with only its seeded constants.
pub fn generate_classes(
    header: &str,
    classes: &[ConstantClass],
    config: &GeneratorConfig,
) -> Result<(String, GenerationReport)> {
    info!(
        class_count = classes.len(),
        header_bytes = header.len(),
        "Generating constants source"
    );

    let mut output = String::new();
    let mut report = GenerationReport::default();

    emit_preamble(&mut output, config);
    emit_declarations(&mut output, classes);

    for class in classes {
        let scanner = HeaderScanner::new(class)?;
        let constants = scanner.collect(header);
        let seeded = class.seeded.len();
        let scanned = constants.len() - seeded;

        if scanned == 0 {
            if config.strict {
                return Err(ConstgenError::empty_class(class.name));
            }
            warn!(class = class.name, "No constants matched in header");
        }
        debug!(
            class = class.name,
            kind = %class.kind,
            seeded,
            scanned,
            "Emitting constant class"
        );

        emit_constant_class(&mut output, class, &constants, config);
        report.classes.push(ClassReport {
            name: class.name,
            seeded,
            scanned,
        });
    }

    emit_dispatcher(&mut output, classes, config);

    info!(
        output_length = output.len(),
        constant_count = report.total_constants(),
        "Constants source generation complete"
    );
    Ok((output, report))
}

/// Reads the whole header from `input` and writes the generated source to
/// `output`. Nothing is written if generation fails.
pub fn generate_to_writer<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    config: &GeneratorConfig,
) -> Result<GenerationReport> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    let header = String::from_utf8(bytes)?;

    let (source, report) = generate_with_report(&header, config)?;
    output.write_all(source.as_bytes())?;
    output.flush()?;
    Ok(report)
}
