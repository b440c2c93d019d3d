//! SH1106 OLED over I2C, driven through embedded-graphics.

use embedded_graphics::{
    mono_font::{iso_8859_1::FONT_5X8, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use linux_embedded_hal::I2cdev;
use sh1106::{interface::I2cInterface, mode::GraphicsMode, Builder};

use crate::core::config::DisplayConfig;
use crate::core::error::DisplayError;

/// Vertical pitch of one text row, in pixels.
const LINE_HEIGHT: i32 = 8;

/// The 128x64 panel in buffered graphics mode.
pub struct Oled {
    display: GraphicsMode<I2cInterface<I2cdev>>,
}

impl Oled {
    /// Open the I2C bus and bring the panel up blanked.
    pub fn new(config: &DisplayConfig) -> Result<Self, DisplayError> {
        let i2c = I2cdev::new(&config.i2c_bus).map_err(|source| DisplayError::Bus {
            bus: config.i2c_bus.clone(),
            source,
        })?;

        let mut display: GraphicsMode<_> = Builder::new()
            .with_i2c_addr(config.i2c_address)
            .connect_i2c(i2c)
            .into();

        display
            .init()
            .map_err(|e| DisplayError::Init(format!("{e:?}")))?;
        display.clear();
        display
            .flush()
            .map_err(|e| DisplayError::Flush(format!("{e:?}")))?;

        Ok(Self { display })
    }

    /// Blit one frame: line `i` at vertical offset `8 * i`, left-aligned.
    pub fn draw_frame(&mut self, lines: &[String]) -> Result<(), DisplayError> {
        self.display.clear();

        let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
        for (row, line) in lines.iter().enumerate() {
            Text::with_baseline(
                line,
                Point::new(0, LINE_HEIGHT * row as i32),
                style,
                Baseline::Top,
            )
            .draw(&mut self.display)
            .map_err(|e| DisplayError::Draw(format!("{e:?}")))?;
        }

        self.display
            .flush()
            .map_err(|e| DisplayError::Flush(format!("{e:?}")))
    }
}
