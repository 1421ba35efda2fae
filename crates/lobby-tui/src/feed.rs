//! Simulated lobby activity.
//!
//! [`LobbyFeed`] stands in for a remote room manager: every step it opens a
//! room, closes one, or moves a few rooms around and signals an update. The
//! RNG is seeded so a run can be replayed.

use lobby_core::{Availability, LocalRoomManager, Position, Room, RoomId, RoomManager};
use rand::{Rng, SeedableRng, rngs::StdRng};

const ADJECTIVES: &[&str] =
    &["cosy", "Fast", "late night", "casual", "tournament", "noob friendly", "chill", "hardcore"];
const NOUNS: &[&str] = &["farm", "lounge", "jam", "practice", "marathon", "streams", "tech", "1v1"];
const HOSTS: &[&str] = &["peppy", "ann", "bo", "cy", "dee", "emu", "fox", "gale"];

/// Fewest rooms the feed keeps open.
const MIN_ROOMS: usize = 4;

/// Seeded source of lobby churn.
#[derive(Debug)]
pub struct LobbyFeed {
    rng: StdRng,
    next_id: RoomId,
}

impl LobbyFeed {
    /// Create a feed replaying `seed`.
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), next_id: 1 }
    }

    /// Open `count` rooms at once.
    pub fn populate(&mut self, manager: &mut LocalRoomManager, count: usize) {
        let rooms: Vec<_> = (0..count).map(|_| self.new_room()).collect();
        manager.add_rooms(rooms);
        tracing::debug!("lobby populated with {count} rooms");
    }

    /// Apply one random change.
    pub fn step(&mut self, manager: &mut LocalRoomManager) {
        let roll = self.rng.random_range(0..100);
        match roll {
            _ if manager.len() < MIN_ROOMS => self.open(manager),
            0..35 => self.open(manager),
            35..60 => self.close(manager),
            _ => self.reshuffle(manager),
        }
    }

    fn open(&mut self, manager: &mut LocalRoomManager) {
        let room = manager.add_room(self.new_room());
        tracing::debug!("feed opened room {room}");
    }

    fn close(&mut self, manager: &mut LocalRoomManager) {
        let rooms = manager.rooms();
        if rooms.is_empty() {
            return;
        }
        let victim = rooms[self.rng.random_range(0..rooms.len())].id();
        if let Some(room) = manager.remove_room(victim) {
            tracing::debug!("feed closed room {room}");
        }
    }

    fn reshuffle(&mut self, manager: &mut LocalRoomManager) {
        let mut moves: Vec<(RoomId, Position)> = Vec::new();
        for room in manager.rooms() {
            if self.rng.random_bool(0.3) {
                moves.push((room.id(), self.rng.random_range(0..100)));
            }
        }
        tracing::debug!("feed moved {} rooms", moves.len());
        manager.set_positions(moves);
    }

    fn new_room(&mut self) -> Room {
        let id = self.next_id;
        self.next_id += 1;

        let name = format!("{} {}", self.pick(ADJECTIVES), self.pick(NOUNS));
        let availability = match self.rng.random_range(0..10) {
            0 => Availability::InviteOnly,
            1 => Availability::FriendsOnly,
            _ => Availability::Public,
        };
        let position = self.rng.random_range(0..100);

        Room::new(id, name, self.pick(HOSTS))
            .with_availability(availability)
            .with_position(position)
    }

    fn pick(&mut self, words: &[&'static str]) -> &'static str {
        words[self.rng.random_range(0..words.len())]
    }
}
