use crate::{Frame, FrameResolver, ImageLoader, Result, SequenceDescriptor, TargetRect};

/// Outcome of pulling from a [`FrameSequencer`].
#[derive(Debug)]
pub enum Step {
    /// The next frame in playback order.
    Frame(Frame),
    /// Every frame has been produced. This is the expected end of the
    /// sequence, not a failure.
    End,
}

/// Forward-only, single-pass cursor over a [`SequenceDescriptor`].
///
/// Frames are decoded on demand; the sequencer keeps no frame after handing
/// it out. Restarting requires a new sequencer.
#[derive(Debug)]
pub struct FrameSequencer<L> {
    descriptor: SequenceDescriptor,
    resolver: FrameResolver<L>,
    rect: TargetRect,
    next_index: usize,
}

impl<L: ImageLoader> FrameSequencer<L> {
    pub fn new(
        descriptor: SequenceDescriptor,
        resolver: FrameResolver<L>,
        rect: TargetRect,
    ) -> Self {
        Self {
            descriptor,
            resolver,
            rect,
            next_index: 0,
        }
    }

    /// Resolves the next unconsumed index, or reports [`Step::End`] once all
    /// frames have been produced. A decode failure leaves the cursor on the
    /// failing index.
    pub fn next_frame(&mut self) -> Result<Step> {
        if self.is_exhausted() {
            return Ok(Step::End);
        }

        let index = self.next_index;
        let path = self.descriptor.locate(index);
        let frame = self.resolver.build(index, &path, self.rect)?;
        self.next_index += 1;
        Ok(Step::Frame(frame))
    }

    /// Number of frames produced so far.
    pub fn position(&self) -> usize {
        self.next_index
    }

    pub fn remaining(&self) -> usize {
        self.descriptor.frame_count() - self.next_index
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_index >= self.descriptor.frame_count()
    }

    pub fn descriptor(&self) -> &SequenceDescriptor {
        &self.descriptor
    }

    pub fn resolver(&self) -> &FrameResolver<L> {
        &self.resolver
    }
}
