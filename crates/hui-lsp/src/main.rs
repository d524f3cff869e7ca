//! HUI Language Server: diagnostics, completions, hover, symbols, colors.
//!
//! A `tower-lsp` based LSP server that wraps `hui-core` for real-time
//! editor feedback on `.ui` files in any LSP-compatible editor.

mod colors;
mod completion;
mod diagnostics;
mod hover;
mod position;
mod symbols;

use hui_core::{ParseOptions, ParseOutput, parse_with};
use ropey::Rope;
use std::collections::HashMap;
use std::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

/// Cached parse state for a single document.
struct DocumentState {
    text: String,
    rope: Rope,
    output: ParseOutput,
}

impl DocumentState {
    fn parse(text: String) -> Self {
        let output = parse_with(&text, &ParseOptions::default());
        let rope = Rope::from_str(&text);
        Self { text, rope, output }
    }

    fn offset_of(&self, pos: Position) -> usize {
        position::position_to_offset(&self.rope, pos)
    }
}

/// The HUI language server backend.
struct HuiLanguageServer {
    client: Client,
    /// Cached document state by URI.
    documents: Mutex<HashMap<Url, DocumentState>>,
}

impl HuiLanguageServer {
    fn new(client: Client) -> Self {
        Self {
            client,
            documents: Mutex::new(HashMap::new()),
        }
    }

    /// Reparse a document and publish diagnostics.
    async fn on_change(&self, uri: Url, text: String) {
        let state = DocumentState::parse(text);
        let diags = diagnostics::compute_diagnostics(&state.text, &state.rope, &state.output);
        log::debug!("{uri}: {} diagnostics", diags.len());

        {
            let mut docs = self.documents.lock().unwrap();
            docs.insert(uri.clone(), state);
        }

        self.client.publish_diagnostics(uri, diags, None).await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for HuiLanguageServer {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![
                        ":".to_string(),
                        "@".to_string(),
                        "$".to_string(),
                    ]),
                    ..Default::default()
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                document_symbol_provider: Some(OneOf::Left(true)),
                color_provider: Some(ColorProviderCapability::Simple(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "hui-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "hui-lsp initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;
        self.on_change(uri, text).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(change) = params.content_changes.into_iter().next_back() {
            self.on_change(uri, change.text).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        {
            let mut docs = self.documents.lock().unwrap();
            docs.remove(&uri);
        }
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let pos = params.text_document_position.position;

        let docs = self.documents.lock().unwrap();
        let items = if let Some(doc) = docs.get(uri) {
            completion::compute_completions(&doc.text, doc.offset_of(pos), &doc.output.document)
        } else {
            Vec::new()
        };

        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let pos = params.text_document_position_params.position;

        let docs = self.documents.lock().unwrap();
        if let Some(doc) = docs.get(uri) {
            Ok(hover::compute_hover(
                &doc.text,
                doc.offset_of(pos),
                &doc.output.document,
            ))
        } else {
            Ok(None)
        }
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = &params.text_document.uri;

        let docs = self.documents.lock().unwrap();
        let syms = match docs.get(uri) {
            Some(doc) => symbols::compute_symbols(&doc.text, &doc.rope, &doc.output.document),
            None => Vec::new(),
        };
        Ok(Some(DocumentSymbolResponse::Nested(syms)))
    }

    async fn document_color(&self, params: DocumentColorParams) -> Result<Vec<ColorInformation>> {
        let docs = self.documents.lock().unwrap();
        Ok(docs
            .get(&params.text_document.uri)
            .map(|doc| colors::document_colors(&doc.text, &doc.rope))
            .unwrap_or_default())
    }

    async fn color_presentation(
        &self,
        params: ColorPresentationParams,
    ) -> Result<Vec<ColorPresentation>> {
        Ok(colors::color_presentations(params.color, params.range))
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    // ── `hui-lsp --dump` mode ───────────────────────────────────────────
    // Reads HUI source from stdin, prints the parsed document as JSON on
    // stdout and recovery diagnostics on stderr, then exits.
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(|s| s.as_str()) == Some("--dump") {
        use std::io::Read;
        let mut text = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut text) {
            eprintln!("hui-lsp --dump error: {e}");
            std::process::exit(1);
        }

        let output = parse_with(&text, &ParseOptions::default());
        for diag in &output.diagnostics {
            eprintln!("{}: {:?} {}", diag.offset, diag.kind, diag.message);
        }
        match serde_json::to_string_pretty(&output.document) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("hui-lsp --dump error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    // ── Standard LSP server mode ─────────────────────────────────────────
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(HuiLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
