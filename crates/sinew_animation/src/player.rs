use slotmap::{SlotMap, new_key_type};

use crate::instance::AnimationInstance;

new_key_type! {
    pub struct InstanceKey;
}

/// Owns every running [`AnimationInstance`] and ticks them together.
///
/// Handles stay valid across removals of other instances.
#[derive(Debug, Default)]
pub struct AnimationPlayer {
    instances: SlotMap<InstanceKey, AnimationInstance>,
}

impl AnimationPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, instance: AnimationInstance) -> InstanceKey {
        self.instances.insert(instance)
    }

    pub fn remove(&mut self, key: InstanceKey) -> Option<AnimationInstance> {
        self.instances.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: InstanceKey) -> Option<&AnimationInstance> {
        self.instances.get(key)
    }

    pub fn get_mut(&mut self, key: InstanceKey) -> Option<&mut AnimationInstance> {
        self.instances.get_mut(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstanceKey, &AnimationInstance)> {
        self.instances.iter()
    }

    /// Advances every instance by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        for (_key, instance) in &mut self.instances {
            instance.update(dt);
        }
    }
}
