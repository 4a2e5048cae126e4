use std::{
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tower_lsp::{
    jsonrpc,
    lsp_types::{Position, Range, TextEdit, Url},
};
use tracing::{debug, info};

use crate::{
    access::{class_body_start, public_region},
    document::{Document, DocumentStore},
    files::{
        COMPILE_COMMANDS_FILE, StripError, current_platform, find_counterpart, implementation_target, resolve_dir,
        strip_compile_commands,
    },
    generate::{
        GeneratedFunction, GetterSetterOption, Placement, ScaffoldFile, SpecialMember, amend_header_guard,
        class_files, create_header_guard, declaration_block, definition_block, getter_setter_options,
        header_guard_name, region_edits, synthesize_getter_setter, synthesize_special_members, unit_test_file,
    },
    member::{AstNode, extract_member_with_prefix},
    output::beautify_output,
    server::settings::ServerSettings,
    signature::FunctionSignature,
    symbols::{ClassSymbol, SymbolNode, find_class_symbols, locate_class, locate_class_at},
};

pub(crate) const CREATE_FUNC_IMPL: &str = "cpphelper.createFuncImpl";
pub(crate) const GETTER_SETTER_OPTIONS: &str = "cpphelper.getterSetterOptions";
pub(crate) const CREATE_GETTER_SETTER: &str = "cpphelper.createGetterSetter";
pub(crate) const SPECIAL_MEMBER_OPTIONS: &str = "cpphelper.specialMemberOptions";
pub(crate) const CREATE_SPECIAL_MEMBER: &str = "cpphelper.createSpecialMember";
pub(crate) const CREATE_HEADER_GUARD: &str = "cpphelper.createHeaderGuard";
pub(crate) const AMEND_HEADER_GUARD: &str = "cpphelper.amendHeaderGuard";
pub(crate) const CREATE_CLASS: &str = "cpphelper.createClass";
pub(crate) const CREATE_UNIT_TEST: &str = "cpphelper.createUnitTest";
pub(crate) const INSERT_REGION: &str = "cpphelper.insertRegion";
pub(crate) const SWITCH_HEADER_SOURCE: &str = "cpphelper.switchHeaderSource";
pub(crate) const STRIP_COMPILE_COMMANDS: &str = "cpphelper.stripCompileCommands";
pub(crate) const BEAUTIFY_BUILD_OUTPUT: &str = "cpphelper.beautifyBuildOutput";

pub(crate) const COMMANDS: [&str; 13] = [
    CREATE_FUNC_IMPL,
    GETTER_SETTER_OPTIONS,
    CREATE_GETTER_SETTER,
    SPECIAL_MEMBER_OPTIONS,
    CREATE_SPECIAL_MEMBER,
    CREATE_HEADER_GUARD,
    AMEND_HEADER_GUARD,
    CREATE_CLASS,
    CREATE_UNIT_TEST,
    INSERT_REGION,
    SWITCH_HEADER_SOURCE,
    STRIP_COMPILE_COMMANDS,
    BEAUTIFY_BUILD_OUTPUT,
];

const NO_ENCLOSING_CLASS: &str = "No enclosing class or struct at the cursor.";

/// Everything a command may read. Commands never mutate server state.
pub(crate) struct CommandContext<'a> {
    pub(crate) settings: &'a ServerSettings,
    pub(crate) documents: &'a DocumentStore,
    pub(crate) workspace_roots: &'a [PathBuf],
}

/// JSON result plus an optional message the client should show.
#[derive(Debug, Default)]
pub(crate) struct CommandOutcome {
    pub(crate) result: Option<Value>,
    pub(crate) warning: Option<String>,
}

impl CommandOutcome {
    fn value(value: impl Serialize) -> Result<Self, CommandError> {
        let value = serde_json::to_value(value).map_err(|error| CommandError::Serialize(error.to_string()))?;
        Ok(Self {
            result: Some(value),
            warning: None,
        })
    }

    fn none() -> Self {
        Self::default()
    }
}

#[derive(Debug)]
pub(crate) enum CommandError {
    UnknownCommand(String),
    InvalidParams { command: String, reason: String },
    Io { path: PathBuf, source: std::io::Error },
    Strip(StripError),
    Serialize(String),
}

impl Display for CommandError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(command) => write!(f, "unknown command '{command}'"),
            Self::InvalidParams { command, reason } => write!(f, "invalid arguments for '{command}': {reason}"),
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Strip(error) => write!(f, "{error}"),
            Self::Serialize(reason) => write!(f, "failed to serialize result: {reason}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Strip(error) => Some(error),
            _ => None,
        }
    }
}

impl From<StripError> for CommandError {
    fn from(error: StripError) -> Self {
        Self::Strip(error)
    }
}

impl From<CommandError> for jsonrpc::Error {
    fn from(error: CommandError) -> Self {
        match error {
            CommandError::UnknownCommand(_) => jsonrpc::Error {
                code: jsonrpc::ErrorCode::MethodNotFound,
                message: error.to_string().into(),
                data: None,
            },
            CommandError::InvalidParams { .. } => jsonrpc::Error::invalid_params(error.to_string()),
            _ => jsonrpc::Error {
                code: jsonrpc::ErrorCode::InternalError,
                message: error.to_string().into(),
                data: None,
            },
        }
    }
}

pub(crate) fn execute_command(
    command: &str,
    arguments: Vec<Value>,
    ctx: &CommandContext<'_>,
) -> Result<CommandOutcome, CommandError> {
    debug!("[command] {command}");
    match command {
        CREATE_FUNC_IMPL => create_func_impl(parse_args(command, arguments)?),
        GETTER_SETTER_OPTIONS => getter_setter_option_labels(parse_args(command, arguments)?, ctx),
        CREATE_GETTER_SETTER => create_getter_setter(command, parse_args(command, arguments)?, ctx),
        SPECIAL_MEMBER_OPTIONS => {
            CommandOutcome::value(SpecialMember::ALL.map(SpecialMember::label))
        },
        CREATE_SPECIAL_MEMBER => create_special_member(command, parse_args(command, arguments)?, ctx),
        CREATE_HEADER_GUARD => {
            let args: UriArgs = parse_args(command, arguments)?;
            header_guard_edits(command, &args.uri, ctx, create_header_guard)
        },
        AMEND_HEADER_GUARD => {
            let args: UriArgs = parse_args(command, arguments)?;
            header_guard_edits(command, &args.uri, ctx, amend_header_guard)
        },
        CREATE_CLASS => {
            let args: CreateClassArgs = parse_args(command, arguments)?;
            let class_name = args.class_name.trim();
            if class_name.is_empty() {
                return Err(invalid(command, "className is empty"));
            }
            let (header, source) = class_files(&args.dir, class_name, &ctx.settings.templates);
            CommandOutcome::value(ClassFilesResult { header, source })
        },
        CREATE_UNIT_TEST => {
            let args: CreateUnitTestArgs = parse_args(command, arguments)?;
            let file_name = args.file_name.trim();
            if file_name.is_empty() {
                return Err(invalid(command, "fileName is empty"));
            }
            CommandOutcome::value(unit_test_file(&args.dir, file_name, &ctx.settings.templates))
        },
        INSERT_REGION => {
            let args: RangeArgs = parse_args(command, arguments)?;
            CommandOutcome::value(region_edits(args.range, &ctx.settings.templates))
        },
        SWITCH_HEADER_SOURCE => {
            let args: UriArgs = parse_args(command, arguments)?;
            let path = file_path(command, &args.uri)?;
            let counterpart =
                find_counterpart(&path, &ctx.settings.navigation.header_source_mappings, ctx.workspace_roots)
                    .and_then(|path| Url::from_file_path(path).ok());
            match counterpart {
                Some(uri) => CommandOutcome::value(uri),
                None => Ok(CommandOutcome::none()),
            }
        },
        STRIP_COMPILE_COMMANDS => match strip_workspace_compile_commands(ctx.settings, ctx.workspace_roots)? {
            Some(count) => CommandOutcome::value(count),
            None => Ok(CommandOutcome::none()),
        },
        BEAUTIFY_BUILD_OUTPUT => {
            let args: TextArgs = parse_args(command, arguments)?;
            CommandOutcome::value(beautify_output(&args.text))
        },
        _ => Err(CommandError::UnknownCommand(command.to_string())),
    }
}

/// Rewrite the workspace compilation database with the current platform's
/// rules. `None` when there is nothing to do.
pub(crate) fn strip_workspace_compile_commands(
    settings: &ServerSettings,
    workspace_roots: &[PathBuf],
) -> Result<Option<usize>, CommandError> {
    let Some(root) = workspace_roots.first() else {
        debug!("[compile-commands] no workspace root");
        return Ok(None);
    };
    let Some(platform) = current_platform() else {
        info!("[compile-commands] stripping is not supported on this platform");
        return Ok(None);
    };
    let Some(rules) = settings.compile_commands.rules_for(platform) else {
        return Ok(None);
    };

    let (src, dst) = compile_commands_paths(settings, root);
    let rewritten = strip_compile_commands(&src, &dst, rules)?;
    info!("[compile-commands] rewrote {rewritten} entries into {}", dst.display());
    Ok(Some(rewritten))
}

/// Source and destination of the compilation database for `root`.
pub(crate) fn compile_commands_paths(
    settings: &ServerSettings,
    root: &Path,
) -> (PathBuf, PathBuf) {
    let src = resolve_dir(&settings.compile_commands.dir, root).join(COMPILE_COMMANDS_FILE);
    let dst = resolve_dir(&settings.compile_commands.output_dir, root).join(COMPILE_COMMANDS_FILE);
    (src, dst)
}

fn create_func_impl(args: FuncImplArgs) -> Result<CommandOutcome, CommandError> {
    let Some(header) = args.uri.to_file_path().ok() else {
        return Ok(CommandOutcome::none());
    };
    let Some(target) = implementation_target(&header) else {
        debug!("[command] {} is not a header", header.display());
        return Ok(CommandOutcome::none());
    };
    let Some(signature) = FunctionSignature::parse(&args.hover) else {
        return Ok(CommandOutcome::none());
    };
    let Ok(target_uri) = Url::from_file_path(&target) else {
        return Ok(CommandOutcome::none());
    };
    let header_name = header.file_name().and_then(|name| name.to_str()).unwrap_or_default();

    CommandOutcome::value(FuncImplResult {
        target_uri,
        include: format!("#include \"{header_name}\""),
        definition: format!("\n{}", signature.definition()),
        declaration: signature.declaration(),
    })
}

fn getter_setter_option_labels(
    args: GetterSetterArgs,
    ctx: &CommandContext<'_>,
) -> Result<CommandOutcome, CommandError> {
    let member = extract_member_with_prefix(
        &args.hover,
        args.ast.as_ref(),
        &ctx.settings.getter_setter.ext_builtin_types,
        &ctx.settings.getter_setter.member_prefix,
    );
    let classes = find_class_symbols(&args.symbols);
    let labels = match args.member_range().and_then(|range| locate_class(&classes, range)) {
        Some(class) => getter_setter_options(class, &member).into_iter().map(GetterSetterOption::label).collect(),
        None => Vec::new(),
    };
    CommandOutcome::value(labels)
}

fn create_getter_setter(
    command: &str,
    args: GetterSetterArgs,
    ctx: &CommandContext<'_>,
) -> Result<CommandOutcome, CommandError> {
    let label = args.option.as_deref().unwrap_or_default();
    let Some(option) = GetterSetterOption::from_label(label) else {
        return Err(invalid(command, format!("unknown option '{label}'")));
    };
    let member = extract_member_with_prefix(
        &args.hover,
        args.ast.as_ref(),
        &ctx.settings.getter_setter.ext_builtin_types,
        &ctx.settings.getter_setter.member_prefix,
    );
    let classes = find_class_symbols(&args.symbols);
    let Some(class) = args.member_range().and_then(|range| locate_class(&classes, range)) else {
        return Ok(CommandOutcome::none());
    };

    let document = load_document(command, &args.uri, ctx.documents)?;
    let class_text = document.text_in(class.range);
    let region = public_region(class, class_text);
    let functions = synthesize_getter_setter(option, &member, &region);
    if functions.is_empty() {
        return Ok(CommandOutcome::none());
    }

    CommandOutcome::value(InsertionResult::new(
        class,
        region.insertion_point(class_body_start(class, class_text)),
        functions,
        source_uri(&args.uri, option.placement),
    ))
}

fn create_special_member(
    command: &str,
    args: SpecialMemberArgs,
    ctx: &CommandContext<'_>,
) -> Result<CommandOutcome, CommandError> {
    let members = args
        .options
        .iter()
        .map(|label| {
            SpecialMember::from_label(label).ok_or_else(|| invalid(command, format!("unknown option '{label}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let classes = find_class_symbols(&args.symbols);
    let Some(class) = locate_class_at(&classes, args.position).filter(|class| !class.name.is_empty()) else {
        return Ok(CommandOutcome {
            result: None,
            warning: Some(NO_ENCLOSING_CLASS.to_string()),
        });
    };

    let placement = if args.in_header.unwrap_or(true) {
        Placement::InHeader
    } else {
        Placement::OutOfLine
    };
    let document = load_document(command, &args.uri, ctx.documents)?;
    let class_text = document.text_in(class.range);
    let region = public_region(class, class_text);
    let functions = synthesize_special_members(&members, &class.name, placement, region.indent());

    CommandOutcome::value(InsertionResult::new(
        class,
        region.insertion_point(class_body_start(class, class_text)),
        functions,
        source_uri(&args.uri, placement),
    ))
}

fn header_guard_edits(
    command: &str,
    uri: &Url,
    ctx: &CommandContext<'_>,
    edits: fn(&str, &str) -> Vec<TextEdit>,
) -> Result<CommandOutcome, CommandError> {
    let path = file_path(command, uri)?;
    let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or_default();
    let guard = header_guard_name(file_name, &ctx.settings.templates.guard_pattern);
    let document = load_document(command, uri, ctx.documents)?;
    CommandOutcome::value(edits(&document.text, &guard))
}

/// Open document for `uri`, or the file on disk when the editor has not opened it.
pub(crate) fn load_document(
    command: &str,
    uri: &Url,
    documents: &DocumentStore,
) -> Result<Document, CommandError> {
    if let Some(document) = documents.get(uri) {
        return Ok(document);
    }
    let path = file_path(command, uri)?;
    let text = std::fs::read_to_string(&path).map_err(|source| CommandError::Io { path, source })?;
    Ok(Document::new(uri.clone(), "cpp".to_string(), text, 0))
}

fn file_path(
    command: &str,
    uri: &Url,
) -> Result<PathBuf, CommandError> {
    uri.to_file_path().map_err(|_| invalid(command, format!("'{uri}' is not a file URI")))
}

fn source_uri(
    uri: &Url,
    placement: Placement,
) -> Option<Url> {
    if placement != Placement::OutOfLine {
        return None;
    }
    let header = uri.to_file_path().ok()?;
    Url::from_file_path(implementation_target(&header)?).ok()
}

fn parse_args<T: DeserializeOwned>(
    command: &str,
    arguments: Vec<Value>,
) -> Result<T, CommandError> {
    let value = arguments.into_iter().next().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|error| invalid(command, error.to_string()))
}

fn invalid(
    command: &str,
    reason: impl Into<String>,
) -> CommandError {
    CommandError::InvalidParams {
        command: command.to_string(),
        reason: reason.into(),
    }
}

#[derive(Debug, Deserialize)]
struct UriArgs {
    uri: Url,
}

#[derive(Debug, Deserialize)]
struct RangeArgs {
    range: Range,
}

#[derive(Debug, Deserialize)]
struct TextArgs {
    text: String,
}

#[derive(Debug, Deserialize)]
struct FuncImplArgs {
    uri: Url,
    hover: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetterSetterArgs {
    uri: Url,
    hover: String,
    #[serde(default)]
    ast: Option<AstNode>,
    #[serde(default)]
    symbols: Vec<SymbolNode>,
    /// Member location when the AST node carries none.
    #[serde(default)]
    range: Option<Range>,
    #[serde(default)]
    option: Option<String>,
}

impl GetterSetterArgs {
    fn member_range(&self) -> Option<Range> {
        self.ast.as_ref().and_then(|ast| ast.range).or(self.range)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpecialMemberArgs {
    uri: Url,
    #[serde(default)]
    symbols: Vec<SymbolNode>,
    position: Position,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    in_header: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateClassArgs {
    dir: PathBuf,
    class_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateUnitTestArgs {
    dir: PathBuf,
    file_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FuncImplResult {
    target_uri: Url,
    include: String,
    definition: String,
    declaration: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertionResult {
    class_name: String,
    insert_at: Position,
    /// All declarations joined, ready to insert at `insert_at`.
    declaration: String,
    /// All out-of-line definitions joined, ready to append to `source_uri`.
    definition: String,
    functions: Vec<GeneratedFunction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_uri: Option<Url>,
}

impl InsertionResult {
    fn new(
        class: &ClassSymbol,
        insert_at: Position,
        functions: Vec<GeneratedFunction>,
        source_uri: Option<Url>,
    ) -> Self {
        Self {
            class_name: class.name.clone(),
            insert_at,
            declaration: declaration_block(&functions),
            definition: definition_block(&functions),
            functions,
            source_uri,
        }
    }
}

#[derive(Debug, Serialize)]
struct ClassFilesResult {
    header: ScaffoldFile,
    source: ScaffoldFile,
}

#[cfg(test)]
#[path = "../../tests/src/server/commands_tests.rs"]
mod tests;
