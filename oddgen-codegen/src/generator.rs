//! Main code generator.

use crate::addons::{Addon, is_module_name};
use crate::error::CodegenError;
use crate::rust::{
    AccessorModuleGenerator, BasicGenerator, ClassIdGenerator, ConverterGenerator,
    ElementGenerator, EnumGenerator, HolderGenerator, ModuleIndexGenerator, holder_module,
};
use oddgen_schema::{GeneratorConfig, ResolvedSchema, SchemaModel};
use std::collections::{BTreeMap, BTreeSet};

/// Generated files keyed by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFiles {
    files: BTreeMap<String, String>,
}

impl GeneratedFiles {
    /// Returns the content of a file.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    /// Iterates over `(file name, content)` pairs, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no file was generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub(crate) fn insert(&mut self, stem: &str, content: String) -> Result<(), CodegenError> {
        let name = format!("{stem}.rs");
        if self.files.contains_key(&name) {
            return Err(CodegenError::generation(format!("duplicate file '{name}'")));
        }
        tracing::debug!(file = %name, bytes = content.len(), "Generated file");
        self.files.insert(name, content);
        Ok(())
    }
}

/// Code generator for a resolved schema.
pub struct Generator<'a> {
    ir: &'a ResolvedSchema,
    config: &'a GeneratorConfig,
    basic: Option<&'a SchemaModel>,
    addons: &'a [Addon],
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(ir: &'a ResolvedSchema, config: &'a GeneratorConfig) -> Self {
        Self {
            ir,
            config,
            basic: None,
            addons: &[],
        }
    }

    /// Also emits the allow-list validator of a reduced schema.
    #[must_use]
    pub fn with_basic(mut self, model: &'a SchemaModel) -> Self {
        self.basic = Some(model);
        self
    }

    /// Copies hand-written modules into the output.
    #[must_use]
    pub fn with_addons(mut self, addons: &'a [Addon]) -> Self {
        self.addons = addons;
        self
    }

    /// Generates every output file in memory.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if two artifacts would share a file
    /// name, a module key is not a valid module name, or two enumerations
    /// would share a converter.
    pub fn generate(&self) -> Result<GeneratedFiles, CodegenError> {
        self.check_names()?;

        let namespace = self.config.namespace.as_str();
        let addon_names: Vec<String> = self.addons.iter().map(|a| a.name.clone()).collect();
        let mut files = GeneratedFiles::default();

        files.insert(
            "att_types",
            EnumGenerator::new(self.ir, namespace)
                .with_addons(&addon_names)
                .generate(),
        )?;
        files.insert(
            "att_converter",
            ConverterGenerator::new(self.ir, namespace).generate(),
        )?;
        files.insert("att_classes", ClassIdGenerator::new(self.ir).generate())?;

        for module in self.ir.modules.values() {
            if !module.classes.is_empty() {
                files.insert(
                    &holder_module(&module.name),
                    HolderGenerator::new(module, namespace).generate(),
                )?;
            }
        }

        if self.config.elements {
            for module in self.ir.modules.values() {
                if !module.elements.is_empty() {
                    files.insert(
                        &module.name,
                        ElementGenerator::new(self.ir, module, namespace).generate()?,
                    )?;
                }
            }
        } else {
            files.insert(
                "att_module",
                AccessorModuleGenerator::new(self.ir, namespace).generate(),
            )?;
        }

        if let Some(model) = self.basic {
            files.insert("basic", BasicGenerator::new(model).generate())?;
        }

        for addon in self.addons {
            files.insert(&addon.name, addon.content.clone())?;
        }

        let stems: Vec<String> = files
            .iter()
            .filter_map(|(name, _)| name.strip_suffix(".rs"))
            .map(str::to_string)
            .collect();
        files.insert("mod", ModuleIndexGenerator::new(stems).generate())?;

        tracing::info!(
            files = files.len(),
            enums = self.ir.enums.len(),
            classes = self.ir.classes().count(),
            elements = self.ir.elements().count(),
            "Generated code"
        );
        Ok(files)
    }

    fn check_names(&self) -> Result<(), CodegenError> {
        for module in self.ir.modules.keys() {
            if !is_module_name(module) {
                return Err(CodegenError::generation(format!(
                    "module key '{module}' is not a valid module name"
                )));
            }
        }

        let mut converters = BTreeSet::new();
        for def in &self.ir.enums {
            if !converters.insert(def.read_fn()) {
                return Err(CodegenError::generation(format!(
                    "enumeration '{}' shares converter '{}' with another type",
                    def.name,
                    def.read_fn()
                )));
            }
        }

        Ok(())
    }
}
