/// One genomic occurrence of a committed locally-collinear block (§4.6, §6.3).
///
/// `id` carries the strand as its sign: positive on the forward strand, negative on the reverse,
/// matching the original implementation's `BlockInstance::GetSignedBlockId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInstance {
    id: i32,
    chr: u32,
    start: u64,
    end: u64,
}

impl BlockInstance {
    pub fn new(id: i32, chr: u32, start: u64, end: u64) -> Self {
        Self { id, chr, start, end }
    }

    pub fn block_id(&self) -> i32 {
        self.id.abs()
    }

    pub fn signed_block_id(&self) -> i32 {
        self.id
    }

    pub fn direction_is_positive(&self) -> bool {
        self.id > 0
    }

    pub fn chr_id(&self) -> u32 {
        self.chr
    }

    /// 1-based conventional coordinates: `start = min(s, e)`, `end = max(s, e)` (§6.3).
    pub fn conventional_start(&self) -> u64 {
        self.start.min(self.end) + 1
    }

    pub fn conventional_end(&self) -> u64 {
        self.start.max(self.end) + 1
    }

    pub fn length(&self) -> u64 {
        self.conventional_end() - self.conventional_start() + 1
    }

    pub fn reverse(&self) -> Self {
        Self { id: -self.id, chr: self.chr, start: self.end, end: self.start }
    }
}
