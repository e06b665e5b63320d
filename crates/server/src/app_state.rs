use std::{collections::HashMap, sync::Mutex, time::Duration};

use catalog::hero_images;
use server_api::{ApiContext, RotatorError, SlideRotator};
use shared::{domain::HeroPage, protocol::StoreEvent};

pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) heroes: HashMap<HeroPage, Mutex<SlideRotator>>,
}

impl AppState {
    /// Starts one hero slideshow per page; they stop when the state is dropped.
    pub(crate) fn new(api: ApiContext, slide_interval: Duration) -> Result<Self, RotatorError> {
        let mut heroes = HashMap::new();
        for page in HeroPage::ALL {
            let rotator = SlideRotator::start(hero_images(page), slide_interval)?;
            heroes.insert(page, Mutex::new(rotator));
        }
        Ok(Self { api, heroes })
    }

    pub(crate) fn publish(&self, event: StoreEvent) {
        // Nobody listening is fine.
        let _ = self.api.events.send(event);
    }
}
