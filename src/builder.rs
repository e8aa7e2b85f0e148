//! Document construction for the guide_gen crate.
//!
//! [`GuideBuilder`] collects an append-only sequence of content blocks and
//! serializes it into a single PDF.  Construction is a strictly linear pass:
//! blocks render in insertion order, nothing is validated, deduplicated, or
//! reordered.  Once the document has been rendered the block sequence is
//! frozen; further mutation fails with [`GuideError::Finalized`].

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use genpdf::elements::Paragraph;
use genpdf::style::{Style, StyledString};
use genpdf::{
    Alignment, Context, Element, Margins, Mm, RenderResult, SimplePageDecorator, Size,
};

use crate::elements;
use crate::error::GuideError;
use crate::fonts;
use crate::model::{
    Block, HorizontalAlignment, ImageBlock, ImageSource, ItemKind, OutlineSection, OutlineSpec,
    TitleBlock,
};

/// Base font size applied to the document's normal style, in points.
pub const DEFAULT_BASE_FONT_SIZE: u8 = 11;

/// Fixed font size for section headings, in points.
pub const HEADING_FONT_SIZE: u8 = 13;

/// Fixed font size for placeholder notes, in points.
pub const PLACEHOLDER_FONT_SIZE: u8 = 10;

const DEFAULT_MARGIN_MM: i32 = 20;
const HEADING_SPACING_TOP_MM: f64 = 2.5;
const HEADING_SPACING_BOTTOM_MM: f64 = 1.0;

/// A fully serialized guide document.
pub struct RenderedGuide {
    /// The PDF file contents.
    pub bytes: Vec<u8>,
}

/// Builder translating an outline plus optional assets into a PDF document.
pub struct GuideBuilder {
    base_font_size: u8,
    paper_size: Option<Size>,
    margins: Option<Margins>,
    blocks: Vec<Block>,
    finalized: bool,
}

impl GuideBuilder {
    /// Creates an empty builder with the default style settings.
    pub fn new() -> Self {
        Self {
            base_font_size: DEFAULT_BASE_FONT_SIZE,
            paper_size: None,
            margins: None,
            blocks: Vec::new(),
            finalized: false,
        }
    }

    /// Sets the base font size used for plain paragraphs and bullets.
    pub fn with_base_font_size(mut self, font_size: u8) -> Self {
        self.base_font_size = font_size;
        self
    }

    /// Sets the paper size used for the rendered document.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the page margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Returns the blocks appended so far, in insertion order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns whether the document has been finalized by a render call.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn ensure_building(&self, operation: &'static str) -> Result<(), GuideError> {
        if self.finalized {
            Err(GuideError::Finalized { operation })
        } else {
            Ok(())
        }
    }

    /// Appends the logo image if `path` exists in the file system.
    ///
    /// A missing file is tolerated: the call is a no-op and returns
    /// `Ok(false)` so the document is generated without a logo.  A file that
    /// exists but cannot be read fails with [`GuideError::Io`].  On success
    /// the image is appended left-aligned, scaled to `width_mm`, and the call
    /// returns `Ok(true)`.
    pub fn add_logo(&mut self, path: impl AsRef<Path>, width_mm: f64) -> Result<bool, GuideError> {
        self.ensure_building("add_logo")?;
        let path = path.as_ref();

        if !path.exists() {
            debug!(
                "Logo {} not found; generating the guide without it",
                path.display()
            );
            return Ok(false);
        }

        let bytes = fs::read(path).map_err(|source| GuideError::io(path, source))?;
        self.blocks.push(Block::Image(
            ImageBlock::new(ImageSource::from_bytes(bytes), width_mm)
                .with_alignment(HorizontalAlignment::Left),
        ));
        Ok(true)
    }

    /// Appends the title block.  Empty text renders an empty block.
    pub fn add_title(
        &mut self,
        text: impl Into<String>,
        bold: bool,
        font_size: u8,
        alignment: HorizontalAlignment,
    ) -> Result<(), GuideError> {
        self.ensure_building("add_title")?;
        self.blocks
            .push(Block::Title(TitleBlock::new(text, bold, font_size, alignment)));
        Ok(())
    }

    /// Appends a plain metadata paragraph.
    pub fn add_metadata(&mut self, text: impl Into<String>) -> Result<(), GuideError> {
        self.ensure_building("add_metadata")?;
        self.blocks.push(Block::Metadata(text.into()));
        Ok(())
    }

    /// Appends a bold section heading at the fixed heading size.
    pub fn add_heading(&mut self, text: impl Into<String>) -> Result<(), GuideError> {
        self.ensure_building("add_heading")?;
        self.blocks.push(Block::Heading(text.into()));
        Ok(())
    }

    /// Appends one bullet block per item, preserving order.
    ///
    /// An empty iterator is legal and appends nothing.
    pub fn add_bullets<I>(&mut self, items: I) -> Result<(), GuideError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.ensure_building("add_bullets")?;
        self.blocks
            .extend(items.into_iter().map(|item| Block::Bullet(item.into())));
        Ok(())
    }

    /// Appends an italic placeholder note at the fixed placeholder size.
    pub fn add_placeholder(&mut self, text: impl Into<String>) -> Result<(), GuideError> {
        self.ensure_building("add_placeholder")?;
        self.blocks.push(Block::Placeholder(text.into()));
        Ok(())
    }

    /// Appends a section heading followed by its items in literal order.
    pub fn add_section(&mut self, section: &OutlineSection) -> Result<(), GuideError> {
        self.add_heading(section.heading())?;
        for item in section.items() {
            match item.kind() {
                ItemKind::Bullet => self.add_bullets([item.text()])?,
                ItemKind::Placeholder => self.add_placeholder(item.text())?,
            }
        }
        Ok(())
    }

    /// Appends every section of the outline in order.
    pub fn add_outline(&mut self, outline: &OutlineSpec) -> Result<(), GuideError> {
        for section in outline.sections() {
            self.add_section(section)?;
        }
        Ok(())
    }

    fn document_title(&self) -> Option<String> {
        self.blocks.iter().find_map(|block| match block {
            Block::Title(title) => title.text().split('\n').next_back().map(str::to_owned),
            _ => None,
        })
    }

    fn block_element(&self, block: &Block) -> Result<Box<dyn Element>, genpdf::error::Error> {
        let element: Box<dyn Element> = match block {
            Block::Image(image) => Box::new(elements::image_element(image)?),
            Block::Title(title) => {
                let mut style = Style::new();
                style.set_font_size(title.font_size());
                if title.is_bold() {
                    style.set_bold();
                }
                Box::new(elements::text_lines(
                    title.text(),
                    style,
                    elements::alignment(title.alignment()),
                ))
            }
            Block::Metadata(text) => {
                Box::new(elements::text_lines(text, Style::new(), Alignment::Left))
            }
            Block::Heading(text) => {
                let mut style = Style::new();
                style.set_bold();
                style.set_font_size(HEADING_FONT_SIZE);
                let paragraph = Paragraph::new(StyledString::new(text.clone(), style));
                Box::new(paragraph.padded(heading_spacing()))
            }
            Block::Bullet(text) => Box::new(elements::bullet_item(text)),
            Block::Placeholder(text) => {
                let mut style = Style::new();
                style.set_italic();
                style.set_font_size(PLACEHOLDER_FONT_SIZE);
                Box::new(Paragraph::new(StyledString::new(text.clone(), style)))
            }
        };
        Ok(element)
    }

    /// Serializes the block sequence into PDF bytes.
    ///
    /// The first call finalizes the builder: the block sequence becomes
    /// immutable and every later `add_*` call fails.  Rendering itself may be
    /// repeated; each call re-serializes the same sequence.
    pub fn render(&mut self) -> Result<RenderedGuide, GuideError> {
        self.finalized = true;

        let font_family = fonts::default_font_family()?;
        let mut document = genpdf::Document::new(font_family);
        document.set_font_size(self.base_font_size);
        if let Some(title) = self.document_title() {
            document.set_title(title);
        }
        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }

        let margins = self.margins.unwrap_or_else(|| {
            Margins::trbl(
                DEFAULT_MARGIN_MM,
                DEFAULT_MARGIN_MM,
                DEFAULT_MARGIN_MM,
                DEFAULT_MARGIN_MM,
            )
        });
        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(margins);
        document.set_page_decorator(decorator);

        for block in &self.blocks {
            document.push(BoxedElement(self.block_element(block)?));
        }

        let mut bytes = Vec::new();
        document.render(&mut bytes)?;
        Ok(RenderedGuide { bytes })
    }

    /// Renders the document and writes it to `path`, creating missing parent
    /// directories first.
    ///
    /// Returns the output path on success.  Directory creation or write
    /// failures surface as [`GuideError::Io`] naming the failing path.
    pub fn render_to_file(&mut self, path: impl AsRef<Path>) -> Result<PathBuf, GuideError> {
        let rendered = self.render()?;
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| GuideError::io(parent, source))?;
        }
        fs::write(path, &rendered.bytes).map_err(|source| GuideError::io(path, source))?;
        Ok(path.to_path_buf())
    }
}

impl Default for GuideBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Newtype that lets a `Box<dyn Element>` satisfy the `Element + 'static`
/// bound on [`genpdf::Document::push`], which is not implemented for the boxed
/// trait object itself.  Rendering delegates straight to the inner element.
struct BoxedElement(Box<dyn Element>);

impl Element for BoxedElement {
    fn render(
        &mut self,
        context: &Context,
        area: genpdf::render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, genpdf::error::Error> {
        self.0.render(context, area, style)
    }
}

fn heading_spacing() -> Margins {
    Margins::trbl(
        Mm::from(printpdf::Mm(HEADING_SPACING_TOP_MM)),
        0,
        Mm::from(printpdf::Mm(HEADING_SPACING_BOTTOM_MM)),
        0,
    )
}
