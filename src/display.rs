// Windowed front-end: the low-res framebuffer lives in one persistent texture
// drawn scaled by tile_size each frame.
use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;

use ascii_fps::{Config, Engine, MoveIntent};

fn poll_intent(rl: &RaylibHandle) -> MoveIntent {
    MoveIntent {
        forward: rl.is_key_down(KeyboardKey::KEY_W) || rl.is_key_down(KeyboardKey::KEY_UP),
        backward: rl.is_key_down(KeyboardKey::KEY_S) || rl.is_key_down(KeyboardKey::KEY_DOWN),
        rotate_left: rl.is_key_down(KeyboardKey::KEY_LEFT),
        rotate_right: rl.is_key_down(KeyboardKey::KEY_RIGHT),
        strafe_left: rl.is_key_down(KeyboardKey::KEY_A),
        strafe_right: rl.is_key_down(KeyboardKey::KEY_D),
    }
}

pub fn run(engine: &mut Engine, config: &Config) -> anyhow::Result<()> {
    let cols = config.tile_cols as i32;
    let rows = config.tile_rows as i32;
    let ts = config.tile_size as i32;
    let (mut rl, thread) = raylib::init()
        .size(cols * ts, rows * ts)
        .title("ASCII FPS")
        .build();
    rl.set_target_fps(60);

    let img = Image::gen_image_color(cols, rows, Color::BLACK);
    let mut tex = rl
        .load_texture_from_image(&thread, &img)
        .map_err(|e| anyhow::anyhow!("creating frame texture: {e:?}"))?;
    tracing::info!(cols, rows, tile_size = ts, "window open");

    loop {
        if rl.window_should_close() || rl.is_key_pressed(KeyboardKey::KEY_ESCAPE) {
            break;
        }
        let intent = poll_intent(&rl);
        let dt = rl.get_frame_time() as f64;
        let report = engine.frame(&intent, dt);

        tex.update_texture(&engine.framebuffer.to_rgba())
            .map_err(|e| anyhow::anyhow!("uploading frame: {e:?}"))?;

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        d.draw_texture_ex(&tex, Vector2::new(0.0, 0.0), 0.0, ts as f32, Color::WHITE);
        d.draw_text(&report.diagnostics.to_string(), 4, 4, 16, Color::WHITE);
    }
    tracing::info!("window closed");
    Ok(())
}
