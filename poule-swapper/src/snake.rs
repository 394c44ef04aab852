//! Snake - back-and-forth pool cursor
//!
//! From a seed position the first `length` requests visit every pool exactly
//! once, alternating outward (p, p+1, p-1, p+2, ...). Once both cursors hit
//! the edges the sequence keeps sweeping boustrophedon from the edge reached
//! last: 1, 2, 3, 4, 4, 3, 2, 1, 1, 2, ...

/// Pool cursor generator (positions are 1-based)
#[derive(Clone, Debug)]
pub struct Snake {
    length: usize,
    odd_cursor: usize,
    even_cursor: usize,
    request_count: usize,
    last: usize,
    sweep: Option<Sweep>,
}

#[derive(Clone, Copy, Debug)]
struct Sweep {
    position: usize,
    ascending: bool,
}

impl Snake {
    /// Create a snake over `length` pools, seeded at pool 1
    ///
    /// # Panics
    /// Panics if `length` is 0
    pub fn new(length: usize) -> Self {
        assert!(length > 0, "Snake length must be > 0");

        let mut snake = Self {
            length,
            odd_cursor: 1,
            even_cursor: 1,
            request_count: 0,
            last: 1,
            sweep: None,
        };
        snake.reset(1);
        snake
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Restart the sequence from `position`
    pub fn reset(&mut self, position: usize) {
        let position = position.clamp(1, self.length);

        self.request_count = 0;
        self.odd_cursor = position;
        self.even_cursor = position;
        self.last = position;
        self.sweep = None;
    }

    /// Next pool position
    pub fn next_position(&mut self) -> usize {
        self.request_count += 1;

        let position = if self.request_count == 1 {
            self.odd_cursor
        } else if let Some(sweep) = self.sweep.as_mut() {
            sweep.advance(self.length)
        } else {
            let next = if self.request_count % 2 == 1 {
                self.next_even_cursor()
            } else {
                self.next_odd_cursor()
            };

            match next {
                Some(position) => position,
                None => {
                    // Both edges reached: bounce on the last one
                    self.sweep = Some(Sweep {
                        position: self.last,
                        ascending: self.last != self.length,
                    });
                    self.last
                }
            }
        };

        self.last = position;
        position
    }

    fn next_even_cursor(&mut self) -> Option<usize> {
        if self.even_cursor > 1 {
            self.even_cursor -= 1;
            Some(self.even_cursor)
        } else if self.odd_cursor < self.length {
            self.odd_cursor += 1;
            Some(self.odd_cursor)
        } else {
            None
        }
    }

    fn next_odd_cursor(&mut self) -> Option<usize> {
        if self.odd_cursor < self.length {
            self.odd_cursor += 1;
            Some(self.odd_cursor)
        } else if self.even_cursor > 1 {
            self.even_cursor -= 1;
            Some(self.even_cursor)
        } else {
            None
        }
    }
}

impl Sweep {
    fn advance(&mut self, length: usize) -> usize {
        if self.ascending {
            if self.position < length {
                self.position += 1;
            } else {
                self.ascending = false;
            }
        } else if self.position > 1 {
            self.position -= 1;
        } else {
            self.ascending = true;
        }
        self.position
    }
}
