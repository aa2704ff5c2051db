//! Interactive menu loop.
//!
//! Reads answers line by line from any `BufRead` and writes prompts to any
//! `Write`, so the whole loop can be driven from in-memory input in tests.
//! End of input ends the session as if the user picked "Exit".

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use log::{debug, warn};
use retouch_core::decode::DecodeError;
use retouch_core::encode::resolve_save_path;
use retouch_core::{Edit, Rect, Session};

use crate::config::Config;

const BANNER: &str = "\
---------------------------------
|    Welcome to Retouch         |
---------------------------------";

const CHOICES: &str = "\
What function do you want to perform?
1. Adjust brightness
2. Crop
3. Blur
4. Save modified image
5. Exit";

enum Flow {
    Continue,
    Exit,
}

pub struct Menu<'a, R, W> {
    input: R,
    out: W,
    config: &'a Config,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(input: R, out: W, config: &'a Config) -> Self {
        Self { input, out, config }
    }

    /// Ask for the input image path. `None` on end of input.
    pub fn prompt_input_path(&mut self) -> io::Result<Option<PathBuf>> {
        let accepted = self.config.open.extensions.join("/");
        let answer = self.prompt(&format!(
            "Enter the path of the input image ({accepted}): "
        ))?;
        Ok(answer.map(PathBuf::from))
    }

    /// Open `path` as a new session, reporting failures to the user.
    pub fn open(&mut self, path: &Path) -> io::Result<Option<Session>> {
        match Session::open(path, &self.config.open) {
            Ok(session) => {
                writeln!(self.out, "Image opened from {}", path.display())?;
                Ok(Some(session))
            }
            Err(DecodeError::UnsupportedExtension { accepted, .. }) => {
                writeln!(
                    self.out,
                    "Invalid image format. Please enter an image with one of these extensions: {accepted}."
                )?;
                Ok(None)
            }
            Err(e) => {
                debug!("open {} failed: {}", path.display(), e);
                writeln!(self.out, "Invalid image path or format.")?;
                Ok(None)
            }
        }
    }

    /// Run the menu until the user exits or input ends.
    pub fn run(&mut self, session: &mut Session) -> Result<()> {
        self.show(session)?;
        loop {
            writeln!(self.out, "{BANNER}")?;
            writeln!(self.out, "{CHOICES}")?;
            let Some(choice) = self.prompt("Enter your choice (1/2/3/4/5): ")? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.brightness(session)?,
                "2" => self.crop(session)?,
                "3" => self.blur(session)?,
                "4" => self.save(session)?,
                "5" => {
                    writeln!(self.out, "Thanks for using!")?;
                    Flow::Exit
                }
                _ => {
                    writeln!(self.out, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }
        Ok(())
    }

    fn brightness(&mut self, session: &mut Session) -> Result<Flow> {
        let Some(value) = self.prompt_parsed::<i32>(
            "Enter the brightness value to add or subtract (+/-): ",
            "Invalid brightness value. Please enter an integer.",
        )?
        else {
            return Ok(Flow::Exit);
        };
        self.apply(session, Edit::Brightness { value })?;
        Ok(Flow::Continue)
    }

    fn crop(&mut self, session: &mut Session) -> Result<Flow> {
        let Some(rect) = self.prompt_rect(
            "Enter the left, top, right, and bottom coordinates(four integers separated by spaces): ",
            "Invalid crop coordinates. Please enter four integers separated by spaces.",
        )?
        else {
            return Ok(Flow::Exit);
        };
        self.apply(session, Edit::Crop { rect })?;
        Ok(Flow::Continue)
    }

    fn blur(&mut self, session: &mut Session) -> Result<Flow> {
        let Some(radius) = self.prompt_radius()? else {
            return Ok(Flow::Exit);
        };

        let Some(answer) = self.prompt("Do you want to blur a selected area? (y/n): ")? else {
            return Ok(Flow::Exit);
        };
        let selection = match answer.as_str() {
            "y" => {
                let Some(rect) = self.prompt_rect(
                    "Enter the left, top, right, and bottom coordinates of the selection area(four integers separated by spaces): ",
                    "Invalid selection area coordinates. Please enter four integers separated by spaces.",
                )?
                else {
                    return Ok(Flow::Exit);
                };
                Some(rect)
            }
            "n" => None,
            _ => {
                writeln!(self.out, "Invalid choice. Please enter y or n.")?;
                return Ok(Flow::Continue);
            }
        };

        self.apply(session, Edit::Blur { radius, selection })?;
        Ok(Flow::Continue)
    }

    fn save(&mut self, session: &Session) -> Result<Flow> {
        let Some(dir) = self.prompt("Enter the path to save the modified image: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(name) = self.prompt("Enter the file name to save the modified image: ")? else {
            return Ok(Flow::Exit);
        };

        let path = resolve_save_path(&dir, &name, &self.config.save, session.source_extension());
        match session.save(&path, self.config.save.jpeg_quality) {
            Ok(()) => writeln!(self.out, "Image saved to {}", path.display())?,
            Err(e) => {
                debug!("save to {} failed: {}", path.display(), e);
                writeln!(
                    self.out,
                    "An error occurred while saving the image ({e}). Please check the path and file name and try again."
                )?
            }
        }
        Ok(Flow::Continue)
    }

    /// Apply an edit, reporting a rejected one instead of failing the loop.
    fn apply(&mut self, session: &mut Session, edit: Edit) -> Result<()> {
        match session.apply(&edit) {
            Ok(()) => self.show(session)?,
            Err(e) => writeln!(self.out, "{e}. The image was not changed.")?,
        }
        Ok(())
    }

    /// Report the working image and refresh the preview file if configured.
    fn show(&mut self, session: &Session) -> io::Result<()> {
        writeln!(self.out, "Current image: {}", session.summary())?;
        if let Some(preview) = &self.config.preview.path {
            if let Err(e) = session.save(preview, self.config.save.jpeg_quality) {
                warn!("could not write preview {}: {}", preview.display(), e);
            }
        }
        Ok(())
    }

    fn prompt_radius(&mut self) -> io::Result<Option<u32>> {
        let max = self.config.blur.max_radius;
        loop {
            let Some(radius) = self.prompt_parsed::<u32>(
                "Enter the blur radius: ",
                "Invalid blur radius. Please enter a non-negative integer.",
            )?
            else {
                return Ok(None);
            };
            if radius <= max {
                return Ok(Some(radius));
            }
            writeln!(self.out, "Blur radius must be at most {max}.")?;
        }
    }

    /// Prompt until the answer parses as `T`. `None` on end of input.
    fn prompt_parsed<T: FromStr>(&mut self, prompt: &str, invalid: &str) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt(prompt)? else {
                return Ok(None);
            };
            match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.out, "{invalid}")?,
            }
        }
    }

    fn prompt_rect(&mut self, prompt: &str, invalid: &str) -> io::Result<Option<Rect>> {
        loop {
            let Some(answer) = self.prompt(prompt)? else {
                return Ok(None);
            };
            match parse_rect(&answer) {
                Some(rect) => return Ok(Some(rect)),
                None => writeln!(self.out, "{invalid}")?,
            }
        }
    }

    /// Print `prompt` and read one trimmed line. `None` on end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Parse `"left top right bottom"` into a rectangle.
///
/// Exactly four non-negative integers are required.
pub fn parse_rect(text: &str) -> Option<Rect> {
    let values = text
        .split_whitespace()
        .map(str::parse::<u32>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    match values[..] {
        [left, top, right, bottom] => Some(Rect::new(left, top, right, bottom)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
    use retouch_core::ColorMode;

    fn gray_session() -> Session {
        let mut img = GrayImage::new(4, 4);
        img.put_pixel(1, 1, Luma([255]));
        Session::new(DynamicImage::ImageLuma8(img))
    }

    /// Run the menu on `input`, returning the printed output.
    fn run(session: &mut Session, config: &Config, input: &str) -> String {
        let mut out = Vec::new();
        Menu::new(input.as_bytes(), &mut out, config)
            .run(session)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_rect() {
        assert_eq!(parse_rect("1 2 3 4"), Some(Rect::new(1, 2, 3, 4)));
        assert_eq!(parse_rect("  10   0 20\t5 "), Some(Rect::new(10, 0, 20, 5)));
        assert_eq!(parse_rect("1 2 3"), None);
        assert_eq!(parse_rect("1 2 3 4 5"), None);
        assert_eq!(parse_rect("1 2 x 4"), None);
        assert_eq!(parse_rect("-1 2 3 4"), None);
        assert_eq!(parse_rect(""), None);
    }

    #[test]
    fn test_exit() {
        let mut session = gray_session();
        let output = run(&mut session, &Config::default(), "5\n");
        assert!(output.contains("Current image: 4x4 L"));
        assert!(output.contains("Thanks for using!"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut session = gray_session();
        let output = run(&mut session, &Config::default(), "");
        assert!(!output.contains("Thanks for using!"));
    }

    #[test]
    fn test_invalid_choice() {
        let mut session = gray_session();
        let output = run(&mut session, &Config::default(), "9\n5\n");
        assert!(output.contains("Invalid choice. Please try again."));
    }

    #[test]
    fn test_brightness_reprompts_until_integer() {
        let mut session = gray_session();
        let output = run(&mut session, &Config::default(), "1\nabc\n10\n5\n");

        assert!(output.contains("Invalid brightness value. Please enter an integer."));
        assert_eq!(session.applied_edits(), 1);
        assert_eq!(session.image().to_luma8().get_pixel(0, 0).0, [10]);
    }

    #[test]
    fn test_whole_image_blur() {
        let mut session = gray_session();
        run(&mut session, &Config::default(), "3\n1\nn\n5\n");

        let img = session.image().to_luma8();
        assert_eq!(img.get_pixel(1, 1).0, [28]);
        assert_eq!(img.get_pixel(0, 0).0, [64]);
        assert_eq!(ColorMode::of(session.image()), ColorMode::L);
    }

    #[test]
    fn test_selection_blur() {
        let mut session = gray_session();
        run(&mut session, &Config::default(), "3\n1\ny\n1 1 3 3\n5\n");

        let img = session.image().to_luma8();
        // 2x2 selection fully covered by radius 1: 255 / 4 = 63.75
        assert_eq!(img.get_pixel(2, 2).0, [64]);
        // outside untouched
        assert_eq!(img.get_pixel(0, 0).0, [0]);
    }

    #[test]
    fn test_blur_invalid_selection_answer() {
        let mut session = gray_session();
        let output = run(&mut session, &Config::default(), "3\n2\nmaybe\n5\n");
        assert!(output.contains("Invalid choice. Please enter y or n."));
        assert_eq!(session.applied_edits(), 0);
    }

    #[test]
    fn test_blur_radius_validation() {
        let mut config = Config::default();
        config.blur.max_radius = 3;
        let mut session = gray_session();
        let output = run(&mut session, &config, "3\n-1\n9\n2\nn\n5\n");

        assert!(output.contains("Invalid blur radius. Please enter a non-negative integer."));
        assert!(output.contains("Blur radius must be at most 3."));
        assert_eq!(session.applied_edits(), 1);
    }

    #[test]
    fn test_out_of_bounds_crop_reported() {
        let mut session = gray_session();
        let output = run(&mut session, &Config::default(), "2\n1 2\n0 0 10 10\n5\n");

        assert!(output.contains("Invalid crop coordinates."));
        assert!(output.contains("Rectangle (0, 0, 10, 10) is outside the 4x4 image"));
        assert_eq!(session.summary(), "4x4 L");
    }

    #[test]
    fn test_crop_then_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            6,
            6,
            Rgb([1, 2, 3]),
        )));
        let input = format!("2\n1 1 4 5\n4\n{}\nout.png\n5\n", dir.path().display());
        let output = run(&mut session, &Config::default(), &input);

        let saved = dir.path().join("out.png");
        assert!(output.contains(&format!("Image saved to {}", saved.display())));
        let reloaded = image::open(&saved).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (3, 4));
    }

    #[test]
    fn test_save_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = gray_session();
        let input = format!("4\n{}\nout.unknown\n5\n", dir.path().display());
        let output = run(&mut session, &Config::default(), &input);
        assert!(output.contains("An error occurred while saving the image"));
    }

    #[test]
    fn test_preview_written_after_edit() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        let preview = dir.path().join("preview.png");
        config.preview.path = Some(preview.clone());

        let mut session = gray_session();
        run(&mut session, &config, "1\n5\n5\n");

        let shown = image::open(&preview).unwrap().to_luma8();
        assert_eq!(shown.get_pixel(0, 0).0, [5]);
    }

    #[test]
    fn test_open_rejects_extension() {
        let config = Config::default();
        let mut out = Vec::new();
        let session = Menu::new(&b""[..], &mut out, &config)
            .open(Path::new("picture.gif"))
            .unwrap();
        assert!(session.is_none());
        assert!(String::from_utf8(out).unwrap().contains("Invalid image format."));
    }

    #[test]
    fn test_open_missing_file() {
        let config = Config::default();
        let mut out = Vec::new();
        let session = Menu::new(&b""[..], &mut out, &config)
            .open(Path::new("/nonexistent/picture.jpg"))
            .unwrap();
        assert!(session.is_none());
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Invalid image path or format."));
    }

    #[test]
    fn test_prompt_input_path() {
        let config = Config::default();
        let mut out = Vec::new();
        let path = Menu::new(&b"  photo.jpg \n"[..], &mut out, &config)
            .prompt_input_path()
            .unwrap();
        assert_eq!(path, Some(PathBuf::from("photo.jpg")));
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Enter the path of the input image (bmp/jpg/jpeg): "));
    }
}
