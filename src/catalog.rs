//! Robot catalog — the fixed set of profiles the board is dealt from.
//!
//! Compiled into the binary; never mutated at runtime. Names are the unique
//! key used by the elimination map, the secret-robot selection and the
//! generated image file names.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purpose {
    Delivery,
    Cleaning,
    HelpingPeople,
    HelpingAnimals,
    Exploration,
    Entertainment,
    Building,
    Fixing,
}

impl Purpose {
    pub fn label(self) -> &'static str {
        match self {
            Purpose::Delivery => "Delivery",
            Purpose::Cleaning => "Cleaning",
            Purpose::HelpingPeople => "Helping people",
            Purpose::HelpingAnimals => "Helping animals",
            Purpose::Exploration => "Exploration",
            Purpose::Entertainment => "Entertainment",
            Purpose::Building => "Building",
            Purpose::Fixing => "Fixing",
        }
    }

    /// Background color for placeholder images (Tailwind 500 shades).
    pub fn hex_color(self) -> &'static str {
        match self {
            Purpose::Delivery => "f59e0b",
            Purpose::Cleaning => "06b6d4",
            Purpose::HelpingPeople => "f43f5e",
            Purpose::HelpingAnimals => "10b981",
            Purpose::Exploration => "8b5cf6",
            Purpose::Entertainment => "d946ef",
            Purpose::Building => "64748b",
            Purpose::Fixing => "eab308",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Wheels,
    Legs,
    Tracks,
    Flying,
    Swimming,
    Stationary,
}

impl Movement {
    pub fn label(self) -> &'static str {
        match self {
            Movement::Wheels => "Wheels",
            Movement::Legs => "Legs",
            Movement::Tracks => "Tracks",
            Movement::Flying => "Flying",
            Movement::Swimming => "Swimming",
            Movement::Stationary => "Stays in one place",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Home,
    Factory,
    Outdoors,
    Underwater,
    Space,
    Hospital,
    Farm,
    Store,
}

impl Environment {
    pub fn label(self) -> &'static str {
        match self {
            Environment::Home => "Home",
            Environment::Factory => "Factory",
            Environment::Outdoors => "Outdoors",
            Environment::Underwater => "Underwater",
            Environment::Space => "Space",
            Environment::Hospital => "Hospital",
            Environment::Farm => "Farm",
            Environment::Store => "Store",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Autonomous,
    RemoteControlled,
    VoiceCommands,
    AppControlled,
}

impl Control {
    pub fn label(self) -> &'static str {
        match self {
            Control::Autonomous => "Autonomous",
            Control::RemoteControlled => "Remote controlled",
            Control::VoiceCommands => "Voice commands",
            Control::AppControlled => "App controlled",
        }
    }
}

/// A single robot profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robot {
    pub name: &'static str,
    pub purpose: Purpose,
    pub movement: Movement,
    pub environment: Environment,
    pub control: Control,
    /// Ordered as shown in the detail view.
    pub sensors: &'static [&'static str],
}

/// Look up a robot by its exact name.
pub fn find_robot(name: &str) -> Option<&'static Robot> {
    ROBOTS.iter().find(|r| r.name == name)
}

pub fn contains(name: &str) -> bool {
    find_robot(name).is_some()
}

pub static ROBOTS: &[Robot] = &[
    Robot {
        name: "Package Drone",
        purpose: Purpose::Delivery,
        movement: Movement::Flying,
        environment: Environment::Outdoors,
        control: Control::Autonomous,
        sensors: &["Camera", "GPS", "Distance sensors"],
    },
    Robot {
        name: "Sidewalk Courier",
        purpose: Purpose::Delivery,
        movement: Movement::Wheels,
        environment: Environment::Outdoors,
        control: Control::Autonomous,
        sensors: &["Camera", "GPS", "Lidar", "Bump sensors"],
    },
    Robot {
        name: "Hospital Supply Cart",
        purpose: Purpose::Delivery,
        movement: Movement::Wheels,
        environment: Environment::Hospital,
        control: Control::Autonomous,
        sensors: &["Lidar", "Bump sensors", "Touch sensors"],
    },
    Robot {
        name: "Grocery Sorting Arm",
        purpose: Purpose::Delivery,
        movement: Movement::Stationary,
        environment: Environment::Store,
        control: Control::Autonomous,
        sensors: &["Camera", "Weight sensor", "Touch sensors"],
    },
    Robot {
        name: "Robot Vacuum",
        purpose: Purpose::Cleaning,
        movement: Movement::Wheels,
        environment: Environment::Home,
        control: Control::AppControlled,
        sensors: &["Bump sensors", "Cliff sensors", "Dirt detector"],
    },
    Robot {
        name: "Window Washer",
        purpose: Purpose::Cleaning,
        movement: Movement::Tracks,
        environment: Environment::Outdoors,
        control: Control::RemoteControlled,
        sensors: &["Distance sensors", "Touch sensors"],
    },
    Robot {
        name: "Pool Cleaner",
        purpose: Purpose::Cleaning,
        movement: Movement::Swimming,
        environment: Environment::Underwater,
        control: Control::Autonomous,
        sensors: &["Bump sensors", "Temperature sensor"],
    },
    Robot {
        name: "Elder Care Companion",
        purpose: Purpose::HelpingPeople,
        movement: Movement::Wheels,
        environment: Environment::Home,
        control: Control::VoiceCommands,
        sensors: &["Camera", "Microphone", "Touch sensors", "Temperature sensor"],
    },
    Robot {
        name: "Surgical Assistant",
        purpose: Purpose::HelpingPeople,
        movement: Movement::Stationary,
        environment: Environment::Hospital,
        control: Control::RemoteControlled,
        sensors: &["Camera", "Force sensors"],
    },
    Robot {
        name: "Guide Robot",
        purpose: Purpose::HelpingPeople,
        movement: Movement::Legs,
        environment: Environment::Outdoors,
        control: Control::VoiceCommands,
        sensors: &["Camera", "Lidar", "Microphone", "GPS"],
    },
    Robot {
        name: "Milking Robot",
        purpose: Purpose::HelpingAnimals,
        movement: Movement::Stationary,
        environment: Environment::Farm,
        control: Control::Autonomous,
        sensors: &["Camera", "Touch sensors"],
    },
    Robot {
        name: "Pet Feeder Bot",
        purpose: Purpose::HelpingAnimals,
        movement: Movement::Wheels,
        environment: Environment::Home,
        control: Control::AppControlled,
        sensors: &["Camera", "Weight sensor", "Motion sensors"],
    },
    Robot {
        name: "Herding Dog Bot",
        purpose: Purpose::HelpingAnimals,
        movement: Movement::Legs,
        environment: Environment::Farm,
        control: Control::RemoteControlled,
        sensors: &["Camera", "GPS", "Motion sensors"],
    },
    Robot {
        name: "Mars Rover",
        purpose: Purpose::Exploration,
        movement: Movement::Wheels,
        environment: Environment::Space,
        control: Control::RemoteControlled,
        sensors: &["Camera", "Temperature sensor", "Chemical sensor"],
    },
    Robot {
        name: "Deep Sea Explorer",
        purpose: Purpose::Exploration,
        movement: Movement::Swimming,
        environment: Environment::Underwater,
        control: Control::RemoteControlled,
        sensors: &["Camera", "Sonar", "Pressure sensor", "Temperature sensor"],
    },
    Robot {
        name: "Cave Mapper",
        purpose: Purpose::Exploration,
        movement: Movement::Legs,
        environment: Environment::Outdoors,
        control: Control::Autonomous,
        sensors: &["Lidar", "Camera", "Gas sensor"],
    },
    Robot {
        name: "Dancing Robot",
        purpose: Purpose::Entertainment,
        movement: Movement::Legs,
        environment: Environment::Home,
        control: Control::VoiceCommands,
        sensors: &["Microphone", "Motion sensors"],
    },
    Robot {
        name: "Theme Park Animatronic",
        purpose: Purpose::Entertainment,
        movement: Movement::Stationary,
        environment: Environment::Outdoors,
        control: Control::Autonomous,
        sensors: &["Motion sensors", "Microphone"],
    },
    Robot {
        name: "Camera Drone",
        purpose: Purpose::Entertainment,
        movement: Movement::Flying,
        environment: Environment::Outdoors,
        control: Control::AppControlled,
        sensors: &["Camera", "GPS", "Distance sensors"],
    },
    Robot {
        name: "Bricklaying Robot",
        purpose: Purpose::Building,
        movement: Movement::Tracks,
        environment: Environment::Outdoors,
        control: Control::Autonomous,
        sensors: &["Lidar", "Camera", "Level sensor"],
    },
    Robot {
        name: "Car Factory Welder",
        purpose: Purpose::Building,
        movement: Movement::Stationary,
        environment: Environment::Factory,
        control: Control::Autonomous,
        sensors: &["Camera", "Force sensors", "Temperature sensor"],
    },
    Robot {
        name: "3D Printing Builder",
        purpose: Purpose::Building,
        movement: Movement::Tracks,
        environment: Environment::Outdoors,
        control: Control::AppControlled,
        sensors: &["Lidar", "Level sensor"],
    },
    Robot {
        name: "Pipe Inspection Crawler",
        purpose: Purpose::Fixing,
        movement: Movement::Tracks,
        environment: Environment::Underwater,
        control: Control::RemoteControlled,
        sensors: &["Camera", "Sonar", "Distance sensors"],
    },
    Robot {
        name: "Satellite Repair Arm",
        purpose: Purpose::Fixing,
        movement: Movement::Stationary,
        environment: Environment::Space,
        control: Control::RemoteControlled,
        sensors: &["Camera", "Force sensors", "Touch sensors"],
    },
];
