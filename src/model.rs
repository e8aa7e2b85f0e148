//! Data structures describing the logical content of the guide document.
//!
//! The types in this module form a rendering-agnostic model of the document:
//! the ordered block sequence that ends up on the page, and the outline that
//! drives its construction.  They intentionally avoid referencing the
//! rendering crate so the values can be inspected and compared in tests
//! without touching fonts or PDF serialization.

use std::path::{Path, PathBuf};

/// Default rendered width of the logo image, 1.2 inches in millimetres.
pub const DEFAULT_LOGO_WIDTH_MM: f64 = 30.48;

/// Horizontal alignment applied to titles and images.
///
/// The variants map directly to [`genpdf::Alignment`] at the element layer;
/// the model stores its own enum so block values stay free of rendering
/// types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
}

/// Representation of image sources supported by the content model.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource {
    /// Image loaded from raw bytes.
    Bytes(Vec<u8>),
    /// Image referenced by a file path.
    Path(PathBuf),
}

impl ImageSource {
    /// Creates a new in-memory image from raw bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Creates an image sourced from a file path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }
}

/// An image placed into the block sequence, scaled to a fixed display width.
///
/// The width is stored as millimetres to make it straightforward to map into
/// the [`genpdf::elements::Image`] scaling API.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBlock {
    source: ImageSource,
    width_mm: f64,
    alignment: HorizontalAlignment,
}

impl ImageBlock {
    /// Creates a new image block with the given source and display width.
    pub fn new(source: ImageSource, width_mm: f64) -> Self {
        Self {
            source,
            width_mm,
            alignment: HorizontalAlignment::Left,
        }
    }

    /// Returns the image source.
    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Returns the requested rendered width in millimetres.
    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    /// Returns the configured alignment.
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Sets the alignment and returns the updated image block.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// The title paragraph shown at the top of the document.
///
/// Embedded `\n` characters split the title into multiple rendered lines
/// sharing the same style.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleBlock {
    text: String,
    bold: bool,
    font_size: u8,
    alignment: HorizontalAlignment,
}

impl TitleBlock {
    /// Creates a new title block.
    pub fn new(
        text: impl Into<String>,
        bold: bool,
        font_size: u8,
        alignment: HorizontalAlignment,
    ) -> Self {
        Self {
            text: text.into(),
            bold,
            font_size,
            alignment,
        }
    }

    /// Returns the title text, possibly containing embedded line breaks.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the title is rendered bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Returns the title font size in points.
    pub fn font_size(&self) -> u8 {
        self.font_size
    }

    /// Returns the configured alignment.
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }
}

/// One renderable unit of the output document.
///
/// Block order is insertion order and determines rendered page order; no
/// reordering occurs after insertion.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// An image scaled to a fixed width, the optional logo.
    Image(ImageBlock),
    /// The styled title paragraph.
    Title(TitleBlock),
    /// A plain paragraph used for version/audience metadata.
    Metadata(String),
    /// A bold section heading.
    Heading(String),
    /// A single list-bullet paragraph.
    Bullet(String),
    /// An italic note marking where a screenshot must later be inserted.
    Placeholder(String),
}

/// Kind tag distinguishing outline items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Rendered as a list-bullet paragraph.
    Bullet,
    /// Rendered as an italic placeholder note.
    Placeholder,
}

/// A single outline entry: item text plus its rendering kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineItem {
    text: String,
    kind: ItemKind,
}

impl OutlineItem {
    /// Creates a bullet item.
    pub fn bullet(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ItemKind::Bullet,
        }
    }

    /// Creates a placeholder item.
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ItemKind::Placeholder,
        }
    }

    /// Returns the item text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the item kind.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }
}

/// A heading plus its ordered items.
///
/// Sections only exist while the block sequence is being constructed; they
/// have no identity in the rendered output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutlineSection {
    heading: String,
    items: Vec<OutlineItem>,
}

impl OutlineSection {
    /// Creates a new section with the provided heading.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            items: Vec::new(),
        }
    }

    /// Returns the section heading.
    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// Returns the items contained in the section.
    pub fn items(&self) -> &[OutlineItem] {
        &self.items
    }

    /// Appends an item and returns the updated section.
    pub fn with_item(mut self, item: OutlineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Appends a bullet item and returns the updated section.
    pub fn with_bullet(self, text: impl Into<String>) -> Self {
        self.with_item(OutlineItem::bullet(text))
    }

    /// Appends a placeholder item and returns the updated section.
    pub fn with_placeholder(self, text: impl Into<String>) -> Self {
        self.with_item(OutlineItem::placeholder(text))
    }
}

/// The ordered content plan driving document construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutlineSpec {
    sections: Vec<OutlineSection>,
}

impl OutlineSpec {
    /// Creates an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sections in authoring order.
    pub fn sections(&self) -> &[OutlineSection] {
        &self.sections
    }

    /// Appends a section and returns the updated outline.
    pub fn with_section(mut self, section: OutlineSection) -> Self {
        self.sections.push(section);
        self
    }

    /// Extends the outline with multiple sections and returns the updated
    /// instance.
    pub fn with_sections<I>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = OutlineSection>,
    {
        self.sections.extend(sections);
        self
    }
}

/// Output configuration constructed by the caller.
///
/// There is no implicit global lookup: the output path and the optional logo
/// asset are passed in explicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputConfig {
    output: PathBuf,
    logo: Option<PathBuf>,
    logo_width_mm: f64,
}

impl OutputConfig {
    /// Creates a configuration writing to `output` with no logo.
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            logo: None,
            logo_width_mm: DEFAULT_LOGO_WIDTH_MM,
        }
    }

    /// Returns the output file path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Returns the logo path, if one was configured.
    pub fn logo(&self) -> Option<&Path> {
        self.logo.as_deref()
    }

    /// Returns the rendered logo width in millimetres.
    pub fn logo_width_mm(&self) -> f64 {
        self.logo_width_mm
    }

    /// Sets the logo path and returns the updated configuration.
    pub fn with_logo(mut self, logo: impl Into<Option<PathBuf>>) -> Self {
        self.logo = logo.into();
        self
    }

    /// Sets the logo width and returns the updated configuration.
    pub fn with_logo_width_mm(mut self, width_mm: f64) -> Self {
        self.logo_width_mm = width_mm;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemKind, OutlineSection, OutlineSpec, OutputConfig, DEFAULT_LOGO_WIDTH_MM};

    #[test]
    fn section_preserves_item_order_and_kind() {
        let section = OutlineSection::new("3) Quick Use")
            .with_bullet("Go to Tab 1.")
            .with_bullet("Enter dates.")
            .with_placeholder("[Insert Screenshot: IHS box]");

        let kinds: Vec<_> = section.items().iter().map(|item| item.kind()).collect();
        assert_eq!(
            kinds,
            [ItemKind::Bullet, ItemKind::Bullet, ItemKind::Placeholder]
        );
        assert_eq!(section.items()[0].text(), "Go to Tab 1.");
        assert_eq!(section.items()[2].text(), "[Insert Screenshot: IHS box]");
    }

    #[test]
    fn outline_preserves_section_order() {
        let outline = OutlineSpec::new()
            .with_section(OutlineSection::new("1) Purpose"))
            .with_section(OutlineSection::new("2) Access"));

        let headings: Vec<_> = outline
            .sections()
            .iter()
            .map(OutlineSection::heading)
            .collect();
        assert_eq!(headings, ["1) Purpose", "2) Access"]);
    }

    #[test]
    fn output_config_defaults_have_no_logo() {
        let config = OutputConfig::new("docs/guide.pdf");
        assert!(config.logo().is_none());
        assert_eq!(config.logo_width_mm(), DEFAULT_LOGO_WIDTH_MM);
    }
}
