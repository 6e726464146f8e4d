pub mod configuration;

pub mod bake {
    pub mod channel;
    pub mod bakerecord;
    pub mod bakereport;
    pub mod overshootbaker;
    pub mod scene;
}

pub mod math {
    pub mod curve {
        pub mod point2d;
        pub mod keyframe;
        pub mod curve;
        pub mod hermite;
        pub mod fcurve;
    }
    pub mod statistics;
}

pub mod momentumerror;

pub mod objectwithuuid;

pub mod overshoot {
    pub mod spring;
    pub mod simulationtrace;
    pub mod overshootsimulator;
}

pub mod velocity {
    pub mod velocityestimator;
}
