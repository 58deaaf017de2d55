//! Contains the syntax trees of whole compilation units and the [`Parser::parse_oberon()`] entry
//! point.

use enum_as_inner::EnumAsInner;
use getset::Getters;
use oberonx_base::source_file::{Location, SourceElement};
use oberonx_lexical::token::{KeywordKind, TokenKind};

use super::{
    declaration::DeclarationSequence,
    statement::StatementSequence,
    types::{TypeActuals, TypeParams},
    Qualident,
};
use crate::{error::Error, parser::Parser};

/// Syntax Synopsis:
///
/// ``` ebnf
/// Unit:
///     Module
///     | Definition
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum Unit {
    Module(Module),
    Definition(Definition),
}

impl Unit {
    /// Gets the name the unit is declared with.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Module(module) => &module.name,
            Self::Definition(definition) => &definition.name,
        }
    }
}

impl SourceElement for Unit {
    fn location(&self) -> Location {
        match self {
            Self::Module(module) => module.location,
            Self::Definition(definition) => definition.location,
        }
    }
}

/// Is an item between a module's heading and its body.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum ModuleItem {
    Imports(ImportList),
    Declarations(DeclarationSequence),
}

impl SourceElement for ModuleItem {
    fn location(&self) -> Location {
        match self {
            Self::Imports(imports) => imports.location,
            Self::Declarations(declarations) => declarations.location(),
        }
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Module:
///     'MODULE' Identifier TypeParams? ';'?
///     (ImportList | DeclarationSequence)*
///     ('BEGIN' StatementSequence)?
///     'END' Identifier '.'?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Module {
    location: Location,

    #[get = "pub"]
    name: String,

    /// Gets the type parameters of a generic module.
    #[get = "pub"]
    type_params: Option<TypeParams>,

    /// Gets the import lists and declaration sequences in the order they were written.
    #[get = "pub"]
    items: Vec<ModuleItem>,

    /// Gets the statements after `BEGIN`, absent if the module has no `BEGIN`.
    #[get = "pub"]
    body: Option<StatementSequence>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Definition:
///     'DEFINITION' Identifier ';'? ImportList? DeclarationSequence 'END' Identifier '.'?
///     ;
/// ```
///
/// Procedures of a definition are bare headings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Definition {
    location: Location,

    #[get = "pub"]
    name: String,

    #[get = "pub"]
    imports: Option<ImportList>,

    #[get = "pub"]
    declarations: DeclarationSequence,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// ImportList:
///     'IMPORT' Import (',' Import)* ';'?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct ImportList {
    location: Location,

    #[get = "pub"]
    imports: Vec<Import>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Import:
///     (Identifier ':=')? Qualident TypeActuals?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Import {
    location: Location,

    /// Gets the local name the module is bound to, if it is renamed.
    #[get = "pub"]
    alias: Option<String>,

    /// Gets the imported module, optionally qualified by the package it lives in.
    #[get = "pub"]
    module: Qualident,

    /// Gets the type arguments instantiating a generic module.
    #[get = "pub"]
    actuals: Option<TypeActuals>,
}

impl Import {
    /// Gets the name the import is visible under in the importing unit.
    #[must_use]
    pub fn local_name(&self) -> &str { self.alias.as_deref().unwrap_or(&self.module.name) }
}

impl_source_element!(Module, Definition, ImportList, Import);

impl<'a> Parser<'a> {
    /// Parses a whole source file.
    ///
    /// The parser must not have been advanced yet; this reads the first token itself.
    ///
    /// # Returns
    /// `None` if the file holds no tokens at all.
    ///
    /// # Errors
    /// If the file starts with anything but `MODULE` or `DEFINITION`, or the unit is
    /// malformed.
    pub fn parse_oberon(&mut self) -> Result<Option<Unit>, Error> {
        self.advance()?;

        match self.kind() {
            TokenKind::Keyword(KeywordKind::Module) => {
                self.parse_module().map(|module| Some(Unit::Module(module)))
            }
            TokenKind::Keyword(KeywordKind::Definition) => self
                .parse_definition()
                .map(|definition| Some(Unit::Definition(definition))),
            TokenKind::Eof => Ok(None),
            _ => Err(self.error("Expecting 'MODULE' or 'DEFINITION' as start of file!")),
        }
    }

    /// Checks the name closing a unit against the name it was opened with.
    fn parse_closing_name(
        &mut self,
        name: &str,
        missing: &str,
        inconsistent: &str,
    ) -> Result<(), Error> {
        self.check_symbol(TokenKind::Identifier, missing)?;
        if self.current().text() != name {
            return Err(self.error(inconsistent));
        }
        self.advance()?;
        self.eat(TokenKind::Dot)?;

        self.check_symbol(TokenKind::Eof, "Expecting End of file!")
    }

    /// Parses a [`Module`] up to the end of the file.
    ///
    /// # Errors
    /// If the module is malformed, its closing name differs from its name, or tokens follow it.
    pub fn parse_module(&mut self) -> Result<Module, Error> {
        let location = self.location();
        self.check_symbol_and_advance(KeywordKind::Module, "Expecting 'MODULE'!")?;
        let name = self.expect_identifier("Name of module is missing!")?;

        let type_params = if self.at(TokenKind::LeftParen) {
            Some(self.parse_type_params()?)
        } else {
            None
        };
        self.eat(TokenKind::Semicolon)?;

        let mut items = Vec::new();
        loop {
            match self.kind() {
                TokenKind::Keyword(KeywordKind::Import) => {
                    items.push(ModuleItem::Imports(self.parse_import_list()?));
                }
                TokenKind::Keyword(
                    KeywordKind::Const
                    | KeywordKind::Type
                    | KeywordKind::Var
                    | KeywordKind::Procedure
                    | KeywordKind::Proc,
                ) => {
                    items.push(ModuleItem::Declarations(
                        self.parse_declaration_sequence(true)?,
                    ));
                }
                _ => break,
            }
        }

        let body = if self.eat(KeywordKind::Begin)? {
            Some(self.parse_statement_sequence()?)
        } else {
            None
        };

        self.check_symbol_and_advance(KeywordKind::End, "Expecting 'END' at end of module!")?;
        self.parse_closing_name(
            &name,
            "Missing module name at end of module!",
            "Module name is inconsistant in module!",
        )?;

        Ok(Module {
            location,
            name,
            type_params,
            items,
            body,
        })
    }

    /// Parses a [`Definition`] up to the end of the file.
    ///
    /// # Errors
    /// If the definition is malformed, its closing name differs from its name, or tokens follow
    /// it.
    pub fn parse_definition(&mut self) -> Result<Definition, Error> {
        let location = self.location();
        self.check_symbol_and_advance(KeywordKind::Definition, "Expecting 'DEFINITION'!")?;
        let name = self.expect_identifier("Missing definition name!")?;
        self.eat(TokenKind::Semicolon)?;

        let imports = if self.at_keyword(KeywordKind::Import) {
            Some(self.parse_import_list()?)
        } else {
            None
        };
        let declarations = self.parse_declaration_sequence(false)?;

        self.check_symbol_and_advance(KeywordKind::End, "Expecting 'END' in defintion!")?;
        self.parse_closing_name(
            &name,
            "Missing ident at end of declaration sequence!",
            "Inconsitant name of definition Sequence!",
        )?;

        Ok(Definition {
            location,
            name,
            imports,
            declarations,
        })
    }

    /// Parses an [`ImportList`].
    ///
    /// # Errors
    /// If the list does not start with `IMPORT` or one of the imports is malformed.
    pub fn parse_import_list(&mut self) -> Result<ImportList, Error> {
        let location = self.location();
        self.check_symbol_and_advance(KeywordKind::Import, "Expecting 'IMPORT'!")?;

        let mut imports = vec![self.parse_import()?];
        while self.eat(TokenKind::Comma)? {
            imports.push(self.parse_import()?);
        }
        self.eat(TokenKind::Semicolon)?;

        Ok(ImportList { location, imports })
    }

    /// Parses an [`Import`].
    ///
    /// # Errors
    /// If a name is missing around `:=` or `.`, or the type arguments are malformed.
    pub fn parse_import(&mut self) -> Result<Import, Error> {
        let location = self.location();
        let first = self.expect_identifier("Expecting name of 'IMPORT' statement!")?;

        let (alias, module_location, module_name) = if self.eat(TokenKind::Assign)? {
            let module_location = self.location();
            let name =
                self.expect_identifier("Expecting name literal after ':=' in import Statement!")?;
            (Some(first), module_location, name)
        } else {
            (None, location, first)
        };

        let module = if self.eat(TokenKind::Dot)? {
            let name =
                self.expect_identifier("Expecting name literal after '.' in import Statement!")?;
            Qualident {
                location: module_location,
                module: Some(module_name),
                name,
            }
        } else {
            Qualident {
                location: module_location,
                module: None,
                name: module_name,
            }
        };

        let actuals = if self.at(TokenKind::LeftParen) {
            Some(self.parse_type_actuals()?)
        } else {
            None
        };

        Ok(Import {
            location,
            alias,
            module,
            actuals,
        })
    }
}
