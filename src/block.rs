// block.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! GIF blocks written by the animation encoder
const CHANNELS: usize = 3;

/// Number of entries in the grayscale palette
pub const PALETTE_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTableExistence {
    Absent,
    Present,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTableOrdering {
    NotSorted,
    Sorted,
}

/// Color table presence, ordering and size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTableConfig {
    existence: ColorTableExistence,
    ordering: ColorTableOrdering,
    table_len: usize, // must be between 2...256
}

impl Default for ColorTableConfig {
    fn default() -> Self {
        let existence = ColorTableExistence::Absent;
        let ordering = ColorTableOrdering::NotSorted;
        let table_len = 2;
        ColorTableConfig {
            existence,
            ordering,
            table_len,
        }
    }
}

impl ColorTableConfig {
    pub fn new(
        existence: ColorTableExistence,
        ordering: ColorTableOrdering,
        table_len: u16,
    ) -> Self {
        let table_len =
            (table_len as usize).max(2).next_power_of_two().min(256);
        ColorTableConfig {
            existence,
            ordering,
            table_len,
        }
    }
    pub fn len(&self) -> usize {
        match self.existence {
            ColorTableExistence::Absent => 0,
            ColorTableExistence::Present => self.table_len,
        }
    }
    fn len_bits(&self) -> u8 {
        let sz = self.table_len;
        for b in 0..7 {
            if (sz >> (b + 1)) == 1 {
                return b;
            }
        }
        7
    }
    pub fn size_bytes(&self) -> usize {
        self.len() * CHANNELS
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum BlockCode {
    ImageDesc_,
    Extension_,
    Trailer_,
}

impl BlockCode {
    pub fn signature(self) -> &'static [u8] {
        use self::BlockCode::*;
        match self {
            ImageDesc_ => b",", // (0x2C) Image separator
            Extension_ => b"!", // (0x21) Extension introducer
            Trailer_ => b";",   // (0x3B) GIF trailer
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum ExtensionCode {
    GraphicControl_,
    Application_,
}

impl From<ExtensionCode> for u8 {
    fn from(t: ExtensionCode) -> Self {
        use self::ExtensionCode::*;
        match t {
            GraphicControl_ => 0xF9,
            Application_ => 0xFF,
        }
    }
}

/// File signature and version
#[derive(Debug)]
pub struct Header {
    version: [u8; 3],
}

impl Default for Header {
    fn default() -> Self {
        Header::with_version(*b"89a")
    }
}

impl Header {
    pub fn with_version(version: [u8; 3]) -> Self {
        Header { version }
    }
    pub fn version(&self) -> [u8; 3] {
        self.version
    }
}

/// Canvas size and global color table flags
#[derive(Debug, Default)]
pub struct LogicalScreenDesc {
    screen_width: u16,
    screen_height: u16,
    flags: u8,
    background_color_idx: u8, // index into global color table
    pixel_aspect_ratio: u8,
}

impl LogicalScreenDesc {
    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;
    const COLOR_RESOLUTION: u8 = 0b0111_0000;
    const COLOR_TABLE_ORDERING: u8 = 0b0000_1000;
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    pub fn with_screen_width(mut self, screen_width: u16) -> Self {
        self.screen_width = screen_width;
        self
    }
    pub fn screen_width(&self) -> u16 {
        self.screen_width
    }
    pub fn with_screen_height(mut self, screen_height: u16) -> Self {
        self.screen_height = screen_height;
        self
    }
    pub fn screen_height(&self) -> u16 {
        self.screen_height
    }
    pub fn flags(&self) -> u8 {
        self.flags
    }
    pub fn with_color_table_config(mut self, tbl: &ColorTableConfig) -> Self {
        let mut flags = tbl.len_bits() & Self::COLOR_TABLE_SIZE;
        flags |= (flags << 4) & Self::COLOR_RESOLUTION;
        if tbl.existence == ColorTableExistence::Present {
            flags |= Self::COLOR_TABLE_PRESENT;
        }
        if tbl.ordering == ColorTableOrdering::Sorted {
            flags |= Self::COLOR_TABLE_ORDERING;
        }
        self.flags = flags;
        self
    }
    pub fn background_color_idx(&self) -> u8 {
        self.background_color_idx
    }
    pub fn pixel_aspect_ratio(&self) -> u8 {
        self.pixel_aspect_ratio
    }
}

/// Palette shared by every frame
#[derive(Debug)]
pub struct GlobalColorTable {
    colors: Vec<u8>,
}

impl GlobalColorTable {
    /// Create a 256 entry grayscale ramp (index i => R=G=B=i)
    pub fn grayscale() -> Self {
        let colors = (0..PALETTE_LEN)
            .flat_map(|i| vec![i as u8; CHANNELS])
            .collect();
        GlobalColorTable { colors }
    }
    pub fn len(&self) -> usize {
        self.colors.len()
    }
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }
}

/// Per-frame delay and transparency
#[derive(Debug, Default)]
pub struct GraphicControl {
    flags: u8,
    delay_time_cs: u16, // delay in centiseconds (hundredths of a second)
    transparent_color_idx: u8,
}

impl GraphicControl {
    const USER_INPUT: u8 = 0b0000_0010;
    const TRANSPARENT_COLOR: u8 = 0b0000_0001;

    pub fn flags(&self) -> u8 {
        self.flags
    }
    pub fn user_input(&self) -> bool {
        (self.flags & Self::USER_INPUT) != 0
    }
    pub fn set_user_input(&mut self, user_input: bool) {
        let u = (user_input as u8) << 1;
        self.flags = (self.flags & !Self::USER_INPUT) | u;
    }
    pub fn delay_time_cs(&self) -> u16 {
        self.delay_time_cs
    }
    pub fn set_delay_time_cs(&mut self, delay_time_cs: u16) {
        self.delay_time_cs = delay_time_cs;
    }
    pub fn transparent_color(&self) -> Option<u8> {
        if (self.flags & Self::TRANSPARENT_COLOR) != 0 {
            Some(self.transparent_color_idx)
        } else {
            None
        }
    }
    pub fn transparent_color_idx(&self) -> u8 {
        self.transparent_color_idx
    }
    pub fn set_transparent_color(&mut self, transparent_color: Option<u8>) {
        match transparent_color {
            Some(t) => {
                self.flags |= Self::TRANSPARENT_COLOR;
                self.transparent_color_idx = t;
            }
            None => {
                self.flags &= !Self::TRANSPARENT_COLOR;
                self.transparent_color_idx = 0;
            }
        }
    }
}

/// Application extension (only the looping extension is written)
#[derive(Debug, Default)]
pub struct Application {
    app_data: Vec<Vec<u8>>, // sequence of sub-blocks
}

impl Application {
    pub fn with_loop_count(loop_count: u16) -> Self {
        let mut app_data = vec![];
        app_data.push(b"NETSCAPE2.0".to_vec());
        let mut v = vec![1];
        v.extend_from_slice(&loop_count.to_le_bytes());
        app_data.push(v);
        Application { app_data }
    }
    pub fn app_data(&self) -> &Vec<Vec<u8>> {
        &self.app_data
    }
    pub fn loop_count(&self) -> Option<u16> {
        // NOTE: this block must follow immediately after GlobalColorTable
        //       (or LogicalScreenDesc if there is no GlobalColorTable).
        let d = &self.app_data;
        let exists = d.len() == 2 &&        // 2 sub-blocks
            d[0] == b"NETSCAPE2.0" &&       // app ID / auth code
            d[1].len() == 3 &&              // app data sub-block length
            d[1][0] == 1; // sub-block ID
        if exists {
            // Number of times to loop animation (zero means loop forever)
            Some(u16::from_le_bytes([d[1][1], d[1][2]]))
        } else {
            None
        }
    }
}

/// Frame position, size and local color table flags
#[derive(Debug, Default)]
pub struct ImageDesc {
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    flags: u8,
}

impl ImageDesc {
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }
    pub fn width(&self) -> u16 {
        self.width
    }
    pub fn with_height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }
    pub fn height(&self) -> u16 {
        self.height
    }
    pub fn left(&self) -> u16 {
        self.left
    }
    pub fn top(&self) -> u16 {
        self.top
    }
    pub fn flags(&self) -> u8 {
        self.flags
    }
    pub fn image_sz(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Palette indices of one frame, compressed when formatted
#[derive(Debug)]
pub struct ImageData {
    min_code_size: u8,
    image_sz: usize,
    data: Vec<u8>,
}

impl ImageData {
    pub fn new(image_sz: usize, min_code_size: u8) -> Self {
        let data = Vec::with_capacity(image_sz);
        ImageData {
            min_code_size,
            image_sz,
            data,
        }
    }
    pub fn is_complete(&self) -> bool {
        self.data.len() == self.image_sz
    }
    pub fn add_data(&mut self, data: &[u8]) {
        let rem = self.image_sz - self.data.len();
        if data.len() <= rem {
            self.data.extend_from_slice(data);
        } else {
            self.data.extend_from_slice(&data[..rem]);
            warn!("Extra image data: {} bytes", data.len() - rem);
        }
    }
    pub fn min_code_size(&self) -> u8 {
        self.min_code_size.max(2) // must be >= 2
    }
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[derive(Debug, Default)]
pub struct Trailer {}

/// One block of a GIF file
#[derive(Debug)]
pub enum Block {
    Header(Header),
    LogicalScreenDesc(LogicalScreenDesc),
    GlobalColorTable(GlobalColorTable),
    Application(Application),
    GraphicControl(GraphicControl),
    ImageDesc(ImageDesc),
    ImageData(ImageData),
    Trailer(Trailer),
}

impl From<Header> for Block {
    fn from(b: Header) -> Self {
        Block::Header(b)
    }
}

impl From<LogicalScreenDesc> for Block {
    fn from(b: LogicalScreenDesc) -> Self {
        Block::LogicalScreenDesc(b)
    }
}

impl From<GlobalColorTable> for Block {
    fn from(b: GlobalColorTable) -> Self {
        Block::GlobalColorTable(b)
    }
}

impl From<Application> for Block {
    fn from(b: Application) -> Self {
        Block::Application(b)
    }
}

impl From<GraphicControl> for Block {
    fn from(b: GraphicControl) -> Self {
        Block::GraphicControl(b)
    }
}

impl From<ImageDesc> for Block {
    fn from(b: ImageDesc) -> Self {
        Block::ImageDesc(b)
    }
}

impl From<ImageData> for Block {
    fn from(b: ImageData) -> Self {
        Block::ImageData(b)
    }
}

impl From<Trailer> for Block {
    fn from(b: Trailer) -> Self {
        Block::Trailer(b)
    }
}
