//! Short synthesized click played on card interactions.

#[cfg(target_arch = "wasm32")]
pub use web::ClickSound;

#[cfg(not(target_arch = "wasm32"))]
pub use headless::ClickSound;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use wasm_bindgen::JsValue;
    use web_sys::{AudioContext, AudioContextState, OscillatorType};

    /// Seconds
    const CLICK_DURATION: f64 = 0.14;
    const ATTACK_TIME: f64 = 0.015;
    const START_GAIN: f32 = 0.001;
    const PEAK_GAIN: f32 = 0.22;
    const START_FREQUENCY: f32 = 720.0;
    const END_FREQUENCY: f32 = 540.0;

    /// The audio context is created on the first click, since browsers refuse to start one before a
    /// user gesture.
    #[derive(Default)]
    pub struct ClickSound {
        context: RefCell<Option<AudioContext>>,
    }

    impl ClickSound {
        pub fn play(&self) {
            if let Err(e) = self.try_play() {
                log::warn!("Failed to play click sound: {e:?}");
            }
        }

        fn try_play(&self) -> Result<(), JsValue> {
            let context = {
                let mut slot = self.context.borrow_mut();
                match slot.as_ref() {
                    Some(context) => context.clone(),
                    None => slot.insert(AudioContext::new()?).clone(),
                }
            };

            if context.state() == AudioContextState::Suspended {
                // the returned promise only tells us when playback is allowed again
                let _ = context.resume()?;
            }

            let now = context.current_time();
            let end = now + CLICK_DURATION;

            let oscillator = context.create_oscillator()?;
            oscillator.set_type(OscillatorType::Triangle);
            let frequency = oscillator.frequency();
            frequency.set_value_at_time(START_FREQUENCY, now)?;
            frequency.exponential_ramp_to_value_at_time(END_FREQUENCY, end)?;

            let gain = context.create_gain()?;
            let level = gain.gain();
            level.set_value_at_time(START_GAIN, now)?;
            level.exponential_ramp_to_value_at_time(PEAK_GAIN, now + ATTACK_TIME)?;
            level.exponential_ramp_to_value_at_time(START_GAIN, end)?;

            oscillator.connect_with_audio_node(&gain)?;
            gain.connect_with_audio_node(&context.destination())?;

            oscillator.start()?;
            oscillator.stop_with_when(end)?;
            Ok(())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    /// Outside the browser there is nothing to play to.
    #[derive(Default)]
    pub struct ClickSound;

    impl ClickSound {
        pub fn play(&self) {
            log::trace!("click");
        }
    }
}
