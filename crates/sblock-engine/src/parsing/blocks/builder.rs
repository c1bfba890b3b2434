use crate::{
    error::{ParseError, ParseWarning},
    extension::{Continuation, ExtensionRegistry},
    parsing::{ParseOptions, rope::span::Span},
};

use super::{
    classify::LineClass,
    containers::{ContainerFrame, ContainerStack},
    kinds::{CodeFence, FenceSig},
    types::Node,
};

/// Lines collected for the Markdown engine since the last block boundary.
#[derive(Debug, Clone, Copy)]
struct MarkdownRun {
    start: usize,
    end: usize,
    has_text: bool,
    /// Open fenced code block inside the run, if any.
    fence: Option<FenceSig>,
}

/// Builds the document tree one classified line at a time.
///
/// For every line the innermost open block gets first say (its continuation
/// matcher may close it), then every extension may try to open a nested
/// block, and otherwise the line joins the pending Markdown run.
pub struct BlockBuilder<'r> {
    registry: &'r ExtensionRegistry,
    options: ParseOptions,
    stack: ContainerStack<'r>,
    run: Option<MarkdownRun>,
    last_line_end: usize,
    warnings: Vec<ParseWarning>,
}

impl<'r> BlockBuilder<'r> {
    pub fn new(registry: &'r ExtensionRegistry, options: ParseOptions) -> Self {
        Self {
            registry,
            options,
            stack: ContainerStack::default(),
            run: None,
            last_line_end: 0,
            warnings: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass) -> Result<(), ParseError> {
        self.last_line_end = c.line.end;

        if let Some(frame) = self.stack.top() {
            let mut cur = c.cursor();
            if frame.extension.try_continue(&mut cur) == Continuation::Finished {
                self.flush_run();
                self.close_top(c);
                return Ok(());
            }
            // Indented lines inside a block are plain content: no nested
            // starts are attempted for them.
            if c.is_indented() {
                self.extend_run(c);
                return Ok(());
            }
        }

        if !c.is_indented() && !self.in_fence() && self.try_open(c)? {
            return Ok(());
        }

        self.extend_run(c);
        Ok(())
    }

    /// Flushes pending content and implicitly closes blocks left open at EOF.
    pub fn finish(mut self) -> (Vec<Node>, Vec<ParseWarning>) {
        self.flush_run();
        while let Some(frame) = self.stack.pop() {
            log::warn!(
                "block '{}' opened on line {} is unterminated; closing at end of document",
                frame.block_type,
                frame.line
            );
            self.warnings.push(ParseWarning::Unterminated {
                block_type: frame.block_type.clone(),
                line: frame.line,
            });
            let end = self.last_line_end;
            let node = frame.into_node(end, end, false);
            self.stack.attach(node);
        }
        (self.stack.into_root(), self.warnings)
    }

    fn in_fence(&self) -> bool {
        matches!(self.run, Some(MarkdownRun { fence: Some(_), .. }))
    }

    fn try_open(&mut self, c: &LineClass) -> Result<bool, ParseError> {
        let registry = self.registry;
        for ext in registry.iter() {
            let mut cur = c.cursor();
            let Some(start) = ext.try_start(&mut cur) else {
                continue;
            };

            if self.stack.depth() >= self.options.max_nesting_depth {
                log::warn!(
                    "rejecting document: block on line {} nests deeper than {}",
                    c.number,
                    self.options.max_nesting_depth
                );
                return Err(ParseError::NestingTooDeep {
                    limit: self.options.max_nesting_depth,
                    line: c.number,
                });
            }

            log::debug!(
                "line {}: open {} block '{}' with {} params",
                c.number,
                ext.marker(),
                start.block_type,
                start.params.len()
            );
            self.flush_run();
            self.stack.open(ContainerFrame {
                extension: ext,
                block_type: start.block_type,
                params: start.params,
                children: vec![],
                start: c.line,
                line: c.number,
            });
            return Ok(true);
        }
        Ok(false)
    }

    fn close_top(&mut self, terminator: &LineClass) {
        if let Some(frame) = self.stack.pop() {
            log::debug!(
                "line {}: close block '{}' opened on line {}",
                terminator.number,
                frame.block_type,
                frame.line
            );
            let node = frame.into_node(terminator.line.start, terminator.line.end, true);
            self.stack.attach(node);
        }
    }

    fn extend_run(&mut self, c: &LineClass) {
        let run = self.run.get_or_insert(MarkdownRun {
            start: c.line.start,
            end: c.line.end,
            has_text: false,
            fence: None,
        });
        run.end = c.line.end;
        run.has_text |= !c.is_blank;
        run.fence = match run.fence {
            Some(open) if CodeFence::closes(open, c.fence_sig) => None,
            Some(open) => Some(open),
            None => c.fence_sig,
        };
    }

    /// Emits the pending run into the innermost container. Blank-only runs
    /// produce no output and are dropped.
    fn flush_run(&mut self) {
        if let Some(run) = self.run.take()
            && run.has_text
        {
            self.stack
                .current_children()
                .push(Node::Markdown(Span::new(run.start, run.end)));
        }
    }
}
